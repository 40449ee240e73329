//! Country → city → ground hierarchy of Test match counts

use crate::clean::GroundRow;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;

/// Name of the root node
pub const ROOT_NAME: &str = "All";

/// A node of the hierarchy.
///
/// Serializes as `{"name", "list"}` for groups and `{"name", "count"}` for
/// leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Group { name: String, list: Vec<Node> },
    Leaf { name: String, count: u32 },
}

impl Node {
    pub fn group(name: impl Into<String>) -> Self {
        Node::Group {
            name: name.into(),
            list: Vec::new(),
        }
    }

    pub fn leaf(name: impl Into<String>, count: u32) -> Self {
        Node::Leaf {
            name: name.into(),
            count,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Group { name, .. } | Node::Leaf { name, .. } => name,
        }
    }

    /// Count of a leaf; `None` for groups
    pub fn count(&self) -> Option<u32> {
        match self {
            Node::Leaf { count, .. } => Some(*count),
            Node::Group { .. } => None,
        }
    }

    /// Children of a group; empty for leaves
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Group { list, .. } => list,
            Node::Leaf { .. } => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Sum of every leaf count below this node
    pub fn total_count(&self) -> u64 {
        match self {
            Node::Leaf { count, .. } => u64::from(*count),
            Node::Group { list, .. } => list.iter().map(Node::total_count).sum(),
        }
    }

    /// Find a direct child by name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.name() == name)
    }
}

/// Grounds of each city, cities of each country, both in first-seen order
type CountryIndex = IndexMap<String, IndexMap<String, Vec<Node>>>;

/// Fold rows into `All → country → city → ground`.
///
/// Countries and cities appear in the order they are first seen. Every row
/// adds its own ground leaf; repeated grounds are not merged.
pub fn build(rows: &[GroundRow]) -> Node {
    let mut countries = CountryIndex::new();

    for row in rows {
        let cities = match countries.entry(row.country.clone()) {
            Entry::Occupied(entry) => {
                log::debug!("Found country: {}", row.country);
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                log::info!("Added new country: {} to the list", row.country);
                entry.insert(IndexMap::new())
            }
        };

        let grounds = match cities.entry(row.city.clone()) {
            Entry::Occupied(entry) => {
                log::debug!("Found city: {}", row.city);
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                log::info!("Added new city: {} to the list of {}", row.city, row.country);
                entry.insert(Vec::new())
            }
        };

        grounds.push(Node::leaf(row.ground.clone(), row.tests));
        log::info!(
            "Added ground: {} to the list of {} with count: {}",
            row.ground,
            row.city,
            row.tests
        );
    }

    let list = countries
        .into_iter()
        .map(|(country, cities)| Node::Group {
            name: country,
            list: cities
                .into_iter()
                .map(|(city, grounds)| Node::Group {
                    name: city,
                    list: grounds,
                })
                .collect(),
        })
        .collect();

    Node::Group {
        name: ROOT_NAME.to_string(),
        list,
    }
}

/// Collapse every city holding exactly one ground into a leaf named
/// `"<ground>, <city>"`. Other cities are left as they are.
pub fn flatten(root: &mut Node) {
    let Node::Group { list: countries, .. } = root else {
        return;
    };

    for country in countries.iter_mut() {
        let Node::Group {
            name: country_name,
            list: cities,
        } = country
        else {
            continue;
        };

        for city in cities.iter_mut() {
            let replacement = match city {
                Node::Group { name, list } if list.len() == 1 => {
                    let ground = &list[0];
                    Node::leaf(
                        format!("{}, {}", ground.name(), name),
                        ground.count().unwrap_or(0),
                    )
                }
                Node::Group { name, .. } => {
                    log::debug!(
                        "More than one ground in {} in {}",
                        name,
                        country_name
                    );
                    continue;
                }
                Node::Leaf { .. } => continue,
            };

            log::debug!("Flattened data for {} in {}", replacement.name(), country_name);
            *city = replacement;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<GroundRow> {
        vec![
            GroundRow::new("India", "Mumbai", "Wankhede Stadium", 5),
            GroundRow::new("India", "Mumbai", "Brabourne Stadium", 1),
            GroundRow::new("India", "Kolkata", "Eden Gardens", 3),
        ]
    }

    #[test]
    fn test_build_groups_in_first_seen_order() {
        let rows = vec![
            GroundRow::new("England", "London", "Lord's", 140),
            GroundRow::new("India", "Kolkata", "Eden Gardens", 42),
            GroundRow::new("England", "Manchester", "Old Trafford", 84),
            GroundRow::new("England", "London", "The Oval", 104),
        ];
        let root = build(&rows);

        assert_eq!(root.name(), "All");
        let names: Vec<&str> = root.children().iter().map(Node::name).collect();
        assert_eq!(names, vec!["England", "India"]);

        let england = root.child("England").unwrap();
        let cities: Vec<&str> = england.children().iter().map(Node::name).collect();
        assert_eq!(cities, vec!["London", "Manchester"]);

        let london = england.child("London").unwrap();
        assert_eq!(
            london.children(),
            &[Node::leaf("Lord's", 140), Node::leaf("The Oval", 104)]
        );
        assert_eq!(root.total_count(), 370);
    }

    #[test]
    fn test_interleaving_countries_keeps_order() {
        let grouped = vec![
            GroundRow::new("England", "London", "Lord's", 140),
            GroundRow::new("England", "Leeds", "Headingley", 80),
            GroundRow::new("India", "Chennai", "Chepauk", 35),
            GroundRow::new("India", "Kolkata", "Eden Gardens", 42),
        ];
        let interleaved = vec![
            grouped[0].clone(),
            grouped[2].clone(),
            grouped[1].clone(),
            grouped[3].clone(),
        ];
        assert_eq!(build(&grouped), build(&interleaved));
    }

    #[test]
    fn test_build_keeps_duplicate_grounds() {
        let rows = vec![
            GroundRow::new("Australia", "Sydney", "SCG", 110),
            GroundRow::new("Australia", "Sydney", "SCG", 110),
        ];
        let root = build(&rows);
        let sydney = root.child("Australia").unwrap().child("Sydney").unwrap();
        assert_eq!(sydney.children().len(), 2);
    }

    #[test]
    fn test_build_does_not_mutate_rows() {
        let rows = sample_rows();
        let before = rows.clone();
        let _ = build(&rows);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_flatten_scenario() {
        let mut root = build(&sample_rows());
        flatten(&mut root);

        let expected = Node::Group {
            name: "All".to_string(),
            list: vec![Node::Group {
                name: "India".to_string(),
                list: vec![
                    Node::Group {
                        name: "Mumbai".to_string(),
                        list: vec![
                            Node::leaf("Wankhede Stadium", 5),
                            Node::leaf("Brabourne Stadium", 1),
                        ],
                    },
                    Node::leaf("Eden Gardens, Kolkata", 3),
                ],
            }],
        };
        assert_eq!(root, expected);
    }

    #[test]
    fn test_flatten_leaves_empty_cities_alone() {
        let mut root = Node::Group {
            name: "All".to_string(),
            list: vec![Node::Group {
                name: "Nowhere".to_string(),
                list: vec![Node::group("Empty City")],
            }],
        };
        let before = root.clone();
        flatten(&mut root);
        assert_eq!(root, before);
    }

    #[test]
    fn test_zero_count_ground_is_kept() {
        let mut root = build(&[GroundRow::new("Kenya", "Nairobi", "Gymkhana Club Ground", 0)]);
        flatten(&mut root);
        let kenya = root.child("Kenya").unwrap();
        assert_eq!(kenya.children(), &[Node::leaf("Gymkhana Club Ground, Nairobi", 0)]);
    }

    #[test]
    fn test_serialize_shape() {
        let mut root = build(&sample_rows());
        flatten(&mut root);
        let json = serde_json::to_value(&root).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "All",
                "list": [{
                    "name": "India",
                    "list": [
                        {"name": "Mumbai", "list": [
                            {"name": "Wankhede Stadium", "count": 5},
                            {"name": "Brabourne Stadium", "count": 1}
                        ]},
                        {"name": "Eden Gardens, Kolkata", "count": 3}
                    ]
                }]
            })
        );
    }
}
