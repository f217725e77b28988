//! Choice catalog: the loaded set of choices and the directed "defeats" relation.
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::constants::NAME_SEPARATOR;

/// One declared choice as it appears in the configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChoiceSpec {
    pub name: String,
    #[serde(rename = "winsAgainst", alias = "wins_against", alias = "defeats")]
    pub wins_against: Vec<String>,
}

/// Raw configuration document: `{ "choices": [ ... ] }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct CatalogSpec {
    pub choices: Vec<ChoiceSpec>,
}

impl CatalogSpec {
    /// Parse the configuration document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or lacks a required field.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Errors raised while building a catalog. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed choice configuration")]
    Parse(#[from] serde_json::Error),
    #[error("configuration declares no choices")]
    Empty,
    #[error("choice #{index} has a blank name")]
    BlankName { index: usize },
    #[error("choice `{name}` is declared more than once")]
    DuplicateChoice { name: String },
    #[error("choice `{choice}` wins against unknown choice `{target}`")]
    UnknownChoice { choice: String, target: String },
    #[error("choice `{name}` cannot win against itself")]
    SelfVictory { name: String },
}

/// A named choice and the set of names it defeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    name: String,
    defeats: BTreeSet<String>,
}

impl Choice {
    fn new(name: String) -> Self {
        Self {
            name,
            defeats: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names this choice defeats, in sorted order.
    pub fn defeats(&self) -> impl Iterator<Item = &str> {
        self.defeats.iter().map(String::as_str)
    }

    #[must_use]
    pub fn can_beat(&self, other: &Self) -> bool {
        self.defeats.contains(&other.name)
    }

    fn add_victory(&mut self, target: &str) {
        self.defeats.insert(target.to_string());
    }
}

/// Pairs that break the "exactly one side wins" assumption of a fair game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceIssue {
    /// Neither choice beats the other; the round would be reported as a loss for both players.
    Unordered { first: String, second: String },
    /// Each choice claims to beat the other.
    Mutual { first: String, second: String },
}

impl fmt::Display for BalanceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unordered { first, second } => {
                write!(f, "neither `{first}` nor `{second}` wins against the other")
            }
            Self::Mutual { first, second } => {
                write!(f, "`{first}` and `{second}` both win against each other")
            }
        }
    }
}

fn match_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Immutable catalog of choices, kept in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    choices: Vec<Choice>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from a parsed configuration document.
    ///
    /// Every choice is declared first; edges are linked in a second pass so a
    /// choice may reference names declared after it.
    ///
    /// # Errors
    ///
    /// Returns an error for empty catalogs, blank or duplicate names, edges to
    /// undeclared names, and choices that list themselves.
    pub fn from_spec(spec: &CatalogSpec) -> Result<Self, CatalogError> {
        if spec.choices.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut choices = Vec::with_capacity(spec.choices.len());
        let mut index = HashMap::with_capacity(spec.choices.len());
        for (position, decl) in spec.choices.iter().enumerate() {
            let name = decl.name.trim();
            if name.is_empty() {
                return Err(CatalogError::BlankName { index: position });
            }
            if index.insert(match_key(name), position).is_some() {
                return Err(CatalogError::DuplicateChoice {
                    name: name.to_string(),
                });
            }
            choices.push(Choice::new(name.to_string()));
        }

        for (position, decl) in spec.choices.iter().enumerate() {
            for target in &decl.wins_against {
                let Some(&target_pos) = index.get(&match_key(target)) else {
                    return Err(CatalogError::UnknownChoice {
                        choice: choices[position].name.clone(),
                        target: target.clone(),
                    });
                };
                if target_pos == position {
                    return Err(CatalogError::SelfVictory {
                        name: choices[position].name.clone(),
                    });
                }
                let target_name = choices[target_pos].name.clone();
                choices[position].add_victory(&target_name);
            }
        }

        log::debug!("built catalog with {} choices", choices.len());
        Ok(Self { choices, index })
    }

    /// Parse and build a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the declared relation is inconsistent.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let spec = CatalogSpec::from_json(json)?;
        Self::from_spec(&spec)
    }

    /// Read, parse and build a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are rejected.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Choice> {
        self.index
            .get(&match_key(name))
            .map(|&position| &self.choices[position])
    }

    /// Choices in declaration order.
    #[must_use]
    pub fn as_slice(&self) -> &[Choice] {
        &self.choices
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Choice> {
        self.choices.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(Choice::name)
    }

    /// Names joined for display, e.g. `rock, paper, scissors`.
    #[must_use]
    pub fn name_list(&self) -> String {
        self.names().collect::<Vec<_>>().join(NAME_SEPARATOR)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.choices.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Report pairs that are not ordered by exactly one edge.
    ///
    /// The catalog does not reject these; callers decide how loudly to complain.
    #[must_use]
    pub fn balance_issues(&self) -> Vec<BalanceIssue> {
        let mut issues = Vec::new();
        for (i, first) in self.choices.iter().enumerate() {
            for second in &self.choices[i + 1..] {
                let pair = (first.name.clone(), second.name.clone());
                match (first.can_beat(second), second.can_beat(first)) {
                    (true, false) | (false, true) => {}
                    (false, false) => issues.push(BalanceIssue::Unordered {
                        first: pair.0,
                        second: pair.1,
                    }),
                    (true, true) => issues.push(BalanceIssue::Mutual {
                        first: pair.0,
                        second: pair.1,
                    }),
                }
            }
        }
        issues
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Choice;
    type IntoIter = std::slice::Iter<'a, Choice>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
