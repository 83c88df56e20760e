//! Editing state of a prediction form.

use std::collections::HashMap;

use crate::commands::{ParamDef, Tier, ValueKind};

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Text(String),
    /// Left empty by the user; the default is sent at submission.
    Blank,
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(s) => s.trim().parse().ok().filter(|n: &f64| n.is_finite()),
            ParamValue::Blank => None,
        }
    }

    /// What the input box shows.
    pub fn display(&self) -> String {
        match self {
            ParamValue::Number(n) => n.to_string(),
            ParamValue::Text(s) => s.clone(),
            ParamValue::Blank => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    defs: Vec<ParamDef>,
    values: HashMap<String, ParamValue>,
}

impl ParameterSet {
    pub fn new(defs: Vec<ParamDef>) -> Self {
        let values = defs.iter().map(|d| (d.id.clone(), initial(d))).collect();
        Self { defs, values }
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn primary(&self) -> impl Iterator<Item = &ParamDef> {
        self.defs.iter().filter(|d| d.tier == Tier::Primary)
    }

    pub fn extra(&self) -> impl Iterator<Item = &ParamDef> {
        self.defs.iter().filter(|d| d.tier == Tier::Extra)
    }

    pub fn has_extra(&self) -> bool {
        self.extra().next().is_some()
    }

    pub fn get(&self, id: &str) -> Option<&ParamValue> {
        self.values.get(id)
    }

    pub fn display(&self, id: &str) -> String {
        self.get(id).map(ParamValue::display).unwrap_or_default()
    }

    /// Apply raw input to one field. Empty input blanks the field; input
    /// that is not a number is ignored. Returns whether anything changed.
    pub fn set(&mut self, id: &str, raw: &str) -> bool {
        let Some(def) = self.defs.iter().find(|d| d.id == id) else {
            return false;
        };

        let trimmed = raw.trim();
        let next = if trimmed.is_empty() {
            ParamValue::Blank
        } else {
            match def.kind {
                ValueKind::Text => ParamValue::Text(raw.to_string()),
                ValueKind::Number => match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => ParamValue::Number(n),
                    _ => return false,
                },
            }
        };

        match self.values.get_mut(id) {
            Some(current) if *current == next => false,
            Some(current) => {
                *current = next;
                true
            }
            None => {
                self.values.insert(id.to_string(), next);
                true
            }
        }
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        self.values = self.defs.iter().map(|d| (d.id.clone(), initial(d))).collect();
    }

    /// Values in the shape the predict command takes; blanks are `None`.
    pub fn to_submission(&self) -> HashMap<String, Option<f64>> {
        self.defs
            .iter()
            .map(|d| {
                let value = self.values.get(&d.id).and_then(ParamValue::as_number);
                (d.id.clone(), value)
            })
            .collect()
    }
}

fn initial(def: &ParamDef) -> ParamValue {
    match def.kind {
        ValueKind::Number => ParamValue::Number(def.default),
        ValueKind::Text => ParamValue::Text(def.default.to_string()),
    }
}
