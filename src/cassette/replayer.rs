//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};
use crate::error::ImageError;

/// Replays a cassette, one queue per `port::method` pair.
///
/// Concurrent callers sharing a replayer (behind a mutex) each receive the
/// next unconsumed interaction, so a cassette with N identical downloads
/// serves N parallel saves.
#[derive(Debug, Default)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Index a loaded cassette, keeping `seq` order within each pair.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut ordered = cassette.interactions.clone();
        ordered.sort_by_key(|i| i.seq);

        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in ordered {
            let key = (interaction.port.clone(), interaction.method.clone());
            queues.entry(key).or_default().push_back(interaction);
        }
        Self { queues }
    }

    /// Number of interactions still queued for `port::method`.
    #[must_use]
    pub fn remaining(&self, port: &str, method: &str) -> usize {
        self.queues.get(&(port.to_string(), method.to_string())).map_or(0, VecDeque::len)
    }

    /// Take the next interaction for `port::method`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Config`] if nothing was recorded for the pair, or
    /// if every recorded interaction has already been served.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction, ImageError> {
        let key = (port.to_string(), method.to_string());
        if !self.queues.contains_key(&key) {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            return Err(ImageError::Config(format!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            )));
        }

        self.queues.get_mut(&key).and_then(VecDeque::pop_front).ok_or_else(|| {
            ImageError::Config(format!(
                "Cassette exhausted: every interaction for port={port:?} method={method:?} \
                 has been consumed."
            ))
        })
    }
}
