use std::collections::BTreeSet;

/// Accumulates the names of call kinds the reconstruction has no
/// handling for. Never aborts the pass; surfaced once at the end of a
/// successful run. BTreeSet keeps the report deterministic.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    unhandled: BTreeSet<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_unhandled(&mut self, name: &str) {
        self.unhandled.insert(name.to_string());
    }

    pub fn unhandled(&self) -> &BTreeSet<String> {
        &self.unhandled
    }

    pub fn is_clean(&self) -> bool {
        self.unhandled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unhandled_names_are_deduplicated_and_sorted() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record_unhandled("vkWaitForFences");
        diagnostics.record_unhandled("vkCreateFence");
        diagnostics.record_unhandled("vkWaitForFences");

        let names: Vec<&str> = diagnostics.unhandled().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["vkCreateFence", "vkWaitForFences"]);
    }
}
