/// A filesystem entry that survived filtering and can be picked by number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Name used for stat/open and substituted for numeric references.
    pub name: String,
    /// Name shown in the list; directories carry a trailing `/`.
    pub display_name: String,
    pub is_dir: bool,
}

impl Candidate {
    pub fn file(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        let name = name.into();
        let display_name = if name.ends_with(std::path::MAIN_SEPARATOR) {
            name.clone()
        } else {
            format!("{name}{}", std::path::MAIN_SEPARATOR)
        };
        Self {
            name,
            display_name,
            is_dir: true,
        }
    }

    pub(crate) fn display_len(&self) -> usize {
        self.display_name.len()
    }
}

/// The candidate list for one interactive session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    candidates: Vec<Candidate>,
}

impl Selector {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// Builds a selector of plain file candidates, in the given order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Candidate::file).collect())
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Looks up a candidate by its 1-based list number.
    pub fn get(&self, number: usize) -> Option<&Candidate> {
        number
            .checked_sub(1)
            .and_then(|idx| self.candidates.get(idx))
    }

    /// Returns the candidate name for an in-range list number, or `token`
    /// unchanged.
    pub fn resolve_reference(&self, token: &str) -> String {
        token
            .parse::<usize>()
            .ok()
            .and_then(|number| self.get(number))
            .map_or_else(|| token.to_string(), |candidate| candidate.name.clone())
    }

    /// With exactly one candidate there is nothing to ask: open it with the
    /// default command.
    pub fn single_match_argv(&self, default_command: &str) -> Option<Vec<String>> {
        match self.candidates.as_slice() {
            [only] => Some(vec![default_command.to_string(), only.name.clone()]),
            _ => None,
        }
    }
}
