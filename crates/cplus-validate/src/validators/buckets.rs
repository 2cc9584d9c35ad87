/// Dataset names grouped by key, in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct Buckets {
    entries: Vec<(String, Vec<String>)>,
}

impl Buckets {
    pub(crate) fn add(&mut self, key: &str, name: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, names)) => names.push(name.to_string()),
            None => self
                .entries
                .push((key.to_string(), vec![name.to_string()])),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// One `(key, comma-joined names)` row per bucket.
    pub(crate) fn into_details(self) -> Vec<(String, String)> {
        self.entries
            .into_iter()
            .map(|(key, names)| (key, names.join(", ")))
            .collect()
    }
}
