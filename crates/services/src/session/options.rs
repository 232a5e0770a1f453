use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use quiz_core::model::{FlagId, FlagRecord};

/// Every question presents exactly this many options: one correct answer
/// plus distractors.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// One multiple-choice option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOption {
    Flag(FlagRecord),
    /// Unselectable filler used when the store cannot supply enough distinct
    /// distractors. Never matches the correct answer.
    Placeholder,
}

impl QuizOption {
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        matches!(self, QuizOption::Flag(_))
    }

    /// Display text for the option button.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            QuizOption::Flag(flag) => flag.name(),
            QuizOption::Placeholder => "N/A",
        }
    }

    #[must_use]
    pub fn flag_id(&self) -> Option<FlagId> {
        match self {
            QuizOption::Flag(flag) => Some(flag.id()),
            QuizOption::Placeholder => None,
        }
    }
}

/// The randomized option set for a single question. Regenerated per question
/// and discarded once the question is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    options: Vec<QuizOption>,
    correct_id: FlagId,
}

impl OptionSet {
    /// Assemble and shuffle the options for one question.
    ///
    /// Distractors matching the correct id or repeating an earlier id are
    /// dropped, the list is capped at `OPTIONS_PER_QUESTION - 1`, and any
    /// shortfall is padded with placeholders. Padding is a degraded-data
    /// fallback for stores with fewer than `OPTIONS_PER_QUESTION` records,
    /// not an error.
    pub fn build(
        correct: FlagRecord,
        distractors: Vec<FlagRecord>,
        rng: &mut impl Rng,
    ) -> Self {
        let correct_id = correct.id();

        let mut seen: HashSet<FlagId> = HashSet::with_capacity(OPTIONS_PER_QUESTION);
        seen.insert(correct_id);

        let mut options: Vec<QuizOption> = Vec::with_capacity(OPTIONS_PER_QUESTION);
        options.push(QuizOption::Flag(correct));
        options.extend(
            distractors
                .into_iter()
                .filter(|f| seen.insert(f.id()))
                .take(OPTIONS_PER_QUESTION - 1)
                .map(QuizOption::Flag),
        );

        if options.len() < OPTIONS_PER_QUESTION {
            log::warn!(
                "only {} distinct options available, padding to {}",
                options.len(),
                OPTIONS_PER_QUESTION
            );
            options.resize(OPTIONS_PER_QUESTION, QuizOption::Placeholder);
        }

        options.as_mut_slice().shuffle(rng);

        Self {
            options,
            correct_id,
        }
    }

    #[must_use]
    pub fn options(&self) -> &[QuizOption] {
        &self.options
    }

    /// Id of the correct answer within this set.
    #[must_use]
    pub fn correct_id(&self) -> FlagId {
        self.correct_id
    }

    /// Whether the given selection is the correct answer.
    #[must_use]
    pub fn is_correct(&self, selected: FlagId) -> bool {
        selected == self.correct_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_flag(id: u64) -> FlagRecord {
        FlagRecord::new(FlagId::new(id), format!("Country {id}"), format!("flag_{id}")).unwrap()
    }

    #[test]
    fn always_four_options_with_correct_exactly_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let set = OptionSet::build(
            build_flag(1),
            vec![build_flag(2), build_flag(3), build_flag(4)],
            &mut rng,
        );

        assert_eq!(set.options().len(), OPTIONS_PER_QUESTION);
        let correct_count = set
            .options()
            .iter()
            .filter(|o| o.flag_id() == Some(FlagId::new(1)))
            .count();
        assert_eq!(correct_count, 1);
        assert!(set.options().iter().all(QuizOption::is_selectable));
    }

    #[test]
    fn data_poor_store_pads_with_placeholders() {
        let mut rng = StdRng::seed_from_u64(7);
        let set = OptionSet::build(build_flag(1), Vec::new(), &mut rng);

        assert_eq!(set.options().len(), OPTIONS_PER_QUESTION);
        let placeholders = set
            .options()
            .iter()
            .filter(|o| !o.is_selectable())
            .count();
        assert_eq!(placeholders, 3);
        assert!(
            set.options()
                .iter()
                .filter(|o| !o.is_selectable())
                .all(|o| o.flag_id() != Some(set.correct_id()))
        );
    }

    #[test]
    fn duplicate_and_correct_distractors_are_dropped() {
        let mut rng = StdRng::seed_from_u64(7);
        let set = OptionSet::build(
            build_flag(1),
            vec![build_flag(1), build_flag(2), build_flag(2)],
            &mut rng,
        );

        let real: Vec<FlagId> = set.options().iter().filter_map(QuizOption::flag_id).collect();
        assert_eq!(real.len(), 2);
        let unique: HashSet<FlagId> = real.iter().copied().collect();
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn excess_distractors_are_capped() {
        let mut rng = StdRng::seed_from_u64(7);
        let set = OptionSet::build(
            build_flag(1),
            (2..=10).map(build_flag).collect(),
            &mut rng,
        );

        assert_eq!(set.options().len(), OPTIONS_PER_QUESTION);
    }

    #[test]
    fn correctness_is_judged_by_id() {
        let mut rng = StdRng::seed_from_u64(7);
        let set = OptionSet::build(
            build_flag(5),
            vec![build_flag(6), build_flag(7), build_flag(8)],
            &mut rng,
        );

        assert!(set.is_correct(FlagId::new(5)));
        assert!(!set.is_correct(FlagId::new(6)));
    }

    #[test]
    fn shuffle_actually_permutes() {
        // With 64 builds the correct answer should not always land on the
        // same position, whatever the seed.
        let positions: HashSet<usize> = (0..64)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let set = OptionSet::build(
                    build_flag(1),
                    vec![build_flag(2), build_flag(3), build_flag(4)],
                    &mut rng,
                );
                set.options()
                    .iter()
                    .position(|o| o.flag_id() == Some(FlagId::new(1)))
                    .unwrap()
            })
            .collect();
        assert!(positions.len() > 1);
    }
}
