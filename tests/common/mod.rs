#![allow(dead_code)]

use std::fmt;

use serde::{Deserialize, Serialize};
use treekit::{Forest, NodeId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub boss: String,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.age)
    }
}

pub fn person(name: &str, age: u32) -> Person {
    Person {
        name: name.to_string(),
        age,
        boss: String::new(),
    }
}

pub fn reporting(name: &str, age: u32, boss: &str) -> Person {
    Person {
        boss: boss.to_string(),
        ..person(name, age)
    }
}

pub fn name_is(node: treekit::NodeRef<'_, Person>, name: &str) -> bool {
    node.data().name == name
}

pub struct OrgChart {
    pub forest: Forest<Person>,
    pub boss: NodeId,
    pub teamleader1: NodeId,
    pub teamleader2: NodeId,
    pub developer1: NodeId,
    pub developer2: NodeId,
    pub developer3: NodeId,
    pub developer4: NodeId,
}

impl OrgChart {
    pub fn names(&self, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|&id| self.forest.data(id).unwrap().name.clone())
            .collect()
    }
}

// Hany(0)
// ├── Mezo(2)
// │   ├── Zaher(5)
// │   ├── Amr(4)
// │   └── Jebril(44)
// └── Hager(1)
//     └── Doaa(3)
pub fn org_chart() -> OrgChart {
    let mut forest = Forest::new();
    let boss = forest.create_root("0", person("Hany", 41));
    let teamleader1 = forest
        .add_child_with_id(boss, "2", person("Mezo", 40))
        .unwrap();
    let teamleader2 = forest
        .add_child_with_id(boss, "1", person("Hager", 38))
        .unwrap();
    let developer1 = forest
        .add_child_with_id(teamleader1, "5", person("Zaher", 25))
        .unwrap();
    let developer2 = forest
        .add_child_with_id(teamleader1, "4", person("Amr", 24))
        .unwrap();
    let developer4 = forest
        .add_child_with_id(teamleader1, "44", person("Jebril", 32))
        .unwrap();
    let developer3 = forest
        .add_child_with_id(teamleader2, "3", person("Doaa", 37))
        .unwrap();
    OrgChart {
        forest,
        boss,
        teamleader1,
        teamleader2,
        developer1,
        developer2,
        developer3,
        developer4,
    }
}

/// Same chart with an intern below Amr. The intern reuses id "5".
pub fn org_chart_with_intern() -> (OrgChart, NodeId) {
    let mut chart = org_chart();
    let intern = chart
        .forest
        .add_child_with_id(chart.developer2, "5", person("Adham", 12))
        .unwrap();
    (chart, intern)
}

pub fn flat_staff() -> Vec<Person> {
    vec![
        reporting("Amr", 24, "Mezo"),
        reporting("Zaher", 25, "Mezo"),
        reporting("Jebril", 31, "Mezo"),
        reporting("Doaa", 37, "Hager"),
        reporting("Hager", 38, "Hany"),
        reporting("Mezo", 40, "Hany"),
        person("Hany", 41),
    ]
}
