//! Record filter cascade.
use log::debug;
use rand::Rng;

use super::types::{QaRecord, RawRecord, RejectReason, Verdict};
use crate::config::CascadeConfig;
use crate::context::ContextSynthesizer;
use crate::error::Error;
use crate::filtering::answer::word_count;
use crate::filtering::QualityGate;
use crate::transformers::Normalizer;

/// Turns an input into a question: surrounding `?` are stripped and a single one is appended.
pub fn to_question(input: &str) -> String {
    format!("{}?", input.trim_matches('?'))
}

/// Decides, per record, whether it is accepted and what the accepted record looks like.
pub struct Cascade {
    config: CascadeConfig,
    normalizer: Normalizer,
    gate: QualityGate,
    synthesizer: ContextSynthesizer,
}

impl Cascade {
    pub fn new(config: CascadeConfig) -> Self {
        Self {
            normalizer: Normalizer::default(),
            gate: QualityGate::new(&config),
            synthesizer: ContextSynthesizer::with_threshold(config.context_overlap_threshold),
            config,
        }
    }

    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }

    /// Process a record, using a thread-local rng for context generation.
    pub fn process(&self, record: &RawRecord) -> Result<Verdict, Error> {
        self.process_with(record, &mut rand::thread_rng())
    }

    /// Process a record.
    ///
    /// Errors only if the record has no target at all.
    pub fn process_with<R: Rng + ?Sized>(
        &self,
        record: &RawRecord,
        rng: &mut R,
    ) -> Result<Verdict, Error> {
        let target = record
            .target()
            .ok_or(Error::MissingField("value/target"))?;

        let target = self.normalizer.normalize(target);
        if target.is_empty() {
            return Ok(Verdict::Rejected(RejectReason::EmptyTarget));
        }

        let mut input = self.normalizer.normalize(&record.input);
        if input.is_empty() {
            return Ok(Verdict::Rejected(RejectReason::EmptyInput));
        }

        self.augment(&mut input, &target);

        if let Err(reason) = self.gate.check(&input, &target) {
            debug!("rejected ({}): {:?}", reason, input);
            return Ok(Verdict::Rejected(reason));
        }

        let question = to_question(&input);
        let context = self.synthesizer.synthesize(&target, rng);

        Ok(Verdict::Accepted(QaRecord {
            question,
            context,
            answer: target,
        }))
    }

    /// Rewrites inputs paired with long targets into questions.
    ///
    /// Short inputs get the first words of the target appended,
    /// then inputs that do not end with `?` become `What is <input>?`.
    fn augment(&self, input: &mut String, target: &str) {
        if word_count(target) <= self.config.long_target_words {
            return;
        }

        if word_count(input) < self.config.min_words {
            for word in target.split_whitespace().take(self.config.augment_words) {
                input.push(' ');
                input.push_str(word);
            }
        }

        if !input.ends_with('?') {
            *input = format!("What is {}?", input);
        }
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new(CascadeConfig::default())
    }
}
