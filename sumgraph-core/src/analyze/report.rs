use std::fmt::Write as _;

use crate::types::CentralityData;

/// Render centrality rankings as a markdown-style text report.
pub fn summarize(data: &CentralityData) -> String {
    let mut out = String::from("### Centrality Measures Summary:\n");

    out.push_str("#### Top Degree Centrality Nodes (most connected):\n");
    for record in &data.degree {
        let _ = writeln!(
            out,
            " - {} with score {}",
            record.entity_name, record.score
        );
    }

    out.push_str("\n#### Top Betweenness Centrality Nodes (influential intermediaries):\n");
    out.push_str("(Not calculated)\n");

    out.push_str("\n#### Top Closeness Centrality Nodes (closest to all others):\n");
    out.push_str("(Not calculated)\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DegreeScore;

    #[test]
    fn summary_lists_degree_nodes_in_order() {
        let data = CentralityData {
            degree: vec![
                DegreeScore {
                    entity_name: "alice".into(),
                    score: 4,
                },
                DegreeScore {
                    entity_name: "bob".into(),
                    score: 1,
                },
            ],
            ..Default::default()
        };

        let expected = "\
### Centrality Measures Summary:
#### Top Degree Centrality Nodes (most connected):
 - alice with score 4
 - bob with score 1

#### Top Betweenness Centrality Nodes (influential intermediaries):
(Not calculated)

#### Top Closeness Centrality Nodes (closest to all others):
(Not calculated)
";
        assert_eq!(summarize(&data), expected);
    }

    #[test]
    fn empty_summary_still_has_all_sections() {
        let out = summarize(&CentralityData::default());
        assert!(out.starts_with("### Centrality Measures Summary:\n"));
        assert!(out.contains("(most connected):\n\n#### Top Betweenness"));
        assert_eq!(out.matches("(Not calculated)").count(), 2);
    }
}
