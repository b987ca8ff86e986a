use std::fmt;

use serde::{Deserialize, Serialize};

/// One line of the card list: which card, which printing and how many copies
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct CardQuery {
    pub name: String,
    pub set_code: String,
    pub number: Option<u32>,
    pub count: u32,
}

impl CardQuery {
    pub fn new(name: &str, set_code: &str, number: Option<u32>, count: u32) -> Self {
        CardQuery {
            name: name.trim().to_string(),
            set_code: set_code.trim().to_string(),
            number,
            count: count.max(1),
        }
    }
}

impl fmt::Display for CardQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(number) => write!(f, "{} ({} #{})", self.name, self.set_code, number),
            None => write!(f, "{} ({})", self.name, self.set_code),
        }
    }
}
