use std::collections::HashSet;

use crate::utilities::string_manipulators::normalize;

/// Makes sure the base ends with exactly one slash
pub fn with_trailing_slash(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

/// Builds one store url: `{base}{name}[-{number}][-{modifier}]-{set}/`
///
/// `base_url` is expected to end with a slash, see [`with_trailing_slash`].
pub fn candidate(
    base_url: &str,
    name: &str,
    set_slug: &str,
    number: Option<u32>,
    modifier: Option<&str>,
) -> String {
    let mut url = format!("{}{}", base_url, normalize(name));
    if let Some(number) = number {
        url.push_str(&format!("-{}", number));
    }
    if let Some(modifier) = modifier {
        url.push_str(&format!("-{}", modifier));
    }
    url.push_str(&format!("-{}/", set_slug));
    url
}

const PRIMARY_STEPS: usize = 3;
const STEPS_PER_MODIFIER: usize = 4;

/// Every url worth trying for one card, best guess first.
///
/// Urls are built on demand so a card that resolves on the first try never
/// builds the modifier sweep. The same url is never yielded twice.
#[derive(Debug, Clone)]
pub struct UrlCandidates {
    base_url: String,
    name: String,
    set_slug: String,
    raw_set_slug: String,
    number: Option<u32>,
    modifiers: Vec<String>,
    next_step: usize,
    seen: HashSet<String>,
}

impl UrlCandidates {
    pub fn new(
        base_url: &str,
        name: &str,
        set_slug: &str,
        set_code: &str,
        number: Option<u32>,
        modifiers: &[String],
    ) -> Self {
        UrlCandidates {
            base_url: with_trailing_slash(base_url),
            name: name.to_string(),
            set_slug: set_slug.to_string(),
            raw_set_slug: normalize(set_code.trim()),
            number,
            modifiers: modifiers.to_vec(),
            next_step: 0,
            seen: HashSet::new(),
        }
    }

    fn step_count(&self) -> usize {
        PRIMARY_STEPS + self.modifiers.len() * STEPS_PER_MODIFIER
    }

    fn url_for_step(&self, step: usize) -> String {
        let base = &self.base_url;
        let set = &self.set_slug;
        match step {
            0 => candidate(base, &self.name, set, self.number, None),
            1 => candidate(base, &self.name, set, None, None),
            2 => candidate(base, &self.name, &self.raw_set_slug, None, None),
            _ => {
                let modifier = self.modifiers[(step - PRIMARY_STEPS) / STEPS_PER_MODIFIER]
                    .as_str();
                let joined_name = format!("{} {}", self.name, modifier);
                match (step - PRIMARY_STEPS) % STEPS_PER_MODIFIER {
                    0 => candidate(base, &self.name, set, self.number, Some(modifier)),
                    1 => candidate(base, &joined_name, set, self.number, None),
                    2 => candidate(base, &self.name, set, None, Some(modifier)),
                    _ => candidate(base, &joined_name, set, None, None),
                }
            }
        }
    }
}

impl Iterator for UrlCandidates {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.next_step < self.step_count() {
            let url = self.url_for_step(self.next_step);
            self.next_step += 1;
            if self.seen.insert(url.clone()) {
                return Some(url);
            }
        }
        None
    }
}
