//! Periodic table view of a chemistry

use super::Chemistry;
use crate::error::Result;
use serde::Serialize;
use std::fmt;

/// One row of the periodic table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodicEntry {
    pub name: String,
    pub string: String,
    pub abundance: f64,
    /// Names of the decay products
    pub decay: Vec<String>,
}

/// Snapshot of a chemistry in its current element order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodicTable {
    pub entries: Vec<PeriodicEntry>,
}

impl PeriodicTable {
    pub fn get(&self, name: &str) -> Option<&PeriodicEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for PeriodicTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = |header: &str, cell: &dyn Fn(&PeriodicEntry) -> usize| {
            2 + self.entries.iter().map(cell).fold(header.len(), usize::max)
        };
        let name_w = width("element", &|e: &PeriodicEntry| e.name.chars().count());
        let string_w = width("string", &|e: &PeriodicEntry| e.string.chars().count());
        let abundance_w = width("abundance", &|e: &PeriodicEntry| abundance_cell(e.abundance).len());

        writeln!(
            f,
            "{:<name_w$} {:<string_w$} {:<abundance_w$} decay",
            "element", "string", "abundance"
        )?;
        for entry in &self.entries {
            writeln!(
                f,
                "{:<name_w$} {:<string_w$} {:<abundance_w$} [{}]",
                entry.name,
                entry.string,
                abundance_cell(entry.abundance),
                entry.decay.join(", ")
            )?;
        }
        Ok(())
    }
}

/// Always shows a decimal point, so vanishing abundances print as `0.0`
fn abundance_cell(abundance: f64) -> String {
    format!("{abundance:?}")
}

impl Chemistry {
    /// Names, strings, abundances and decays of every element
    pub fn periodic_table(&mut self, decimal_places: u32, abundance_sum: f64) -> Result<PeriodicTable> {
        let abundances = self.abundances(decimal_places, abundance_sum)?;
        let entries = self
            .elements()
            .iter()
            .zip(abundances)
            .map(|(element, abundance)| PeriodicEntry {
                name: element.name().to_string(),
                string: element.string().to_string(),
                abundance,
                decay: self
                    .decay_of(element)
                    .into_iter()
                    .map(|product| product.name().to_string())
                    .collect(),
            })
            .collect();
        Ok(PeriodicTable { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::ElementOrder;
    use crate::say::LookAndSay;

    fn negafibnary_table() -> PeriodicTable {
        let mut chem = Chemistry::binary(LookAndSay::negafibnary());
        chem.generate_elements(&["0"]).unwrap();
        chem.order_elements(ElementOrder::Abundance, false, true).unwrap();
        chem.periodic_table(1, 100.0).unwrap()
    }

    #[test]
    fn test_negafibnary_table() {
        let table = negafibnary_table();
        assert_eq!(table.len(), 2);
        let e1 = table.get("E1").unwrap();
        assert_eq!(e1.string, "1110");
        assert_eq!(e1.abundance, 61.8);
        assert_eq!(e1.decay, vec!["E2", "E1"]);
        let e2 = table.get("E2").unwrap();
        assert_eq!(e2.string, "10");
        assert_eq!(e2.abundance, 38.2);
        assert_eq!(e2.decay, vec!["E1"]);
        assert!(table.get("E3").is_none());
    }

    #[test]
    fn test_display() {
        let rendered = negafibnary_table().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "element   string   abundance   decay");
        assert_eq!(lines[1], "E1        1110     61.8        [E2, E1]");
        assert_eq!(lines[2], "E2        10       38.2        [E1]");
    }

    #[test]
    fn test_display_zero_abundance() {
        let mut chem = Chemistry::conway();
        chem.generate_elements(&["9"]).unwrap();
        let table = chem.periodic_table(8, 100.0).unwrap();
        let rendered = table.to_string();
        let rows: Vec<Vec<&str>> = rendered
            .lines()
            .skip(1)
            .map(|line| line.split_whitespace().collect())
            .collect();
        assert_eq!(rows.len(), 94);
        let transuranic: Vec<&Vec<&str>> = rows.iter().filter(|row| row[2] == "0.0").collect();
        assert_eq!(transuranic.len(), 2);
        assert!(rows.iter().all(|row| row[2].contains('.')));
    }

    #[test]
    fn test_json() {
        let json = negafibnary_table().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["entries"][0]["name"], "E1");
        assert_eq!(value["entries"][1]["decay"][0], "E1");
        assert_eq!(value["entries"][1]["abundance"], 38.2);
    }

    #[test]
    fn test_conway_table_uses_element_names() {
        let mut chem = Chemistry::conway();
        chem.generate_elements(&["1"]).unwrap();
        let table = chem.periodic_table(4, 100.0).unwrap();
        let h = table.get("H").unwrap();
        assert_eq!(h.string, "22");
        assert_eq!(h.decay, vec!["H"]);
        assert_eq!(table.entries.last().unwrap().name, "U");
        assert_eq!(table.get("U").unwrap().decay, vec!["Pa"]);
    }
}
