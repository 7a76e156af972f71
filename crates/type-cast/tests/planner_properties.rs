//! Property-based tests for the planner's core invariant: replaying a
//! plan's steps through local buffer semantics always reproduces the
//! normalized target text, for any seed and any options within range.

use proptest::prelude::*;
use type_cast::config::TypingOptions;
use type_cast::plan_seeded;

fn replay(plan: &type_cast::TypingPlan) -> String {
    let mut buf = String::new();
    let mut caret = 0usize;
    for step in &plan.steps {
        step.apply_to(&mut buf, &mut caret);
    }
    buf
}

proptest! {
    #[test]
    fn replay_reproduces_the_normalized_text(
        text in "[a-zA-Z0-9 .,!?\n]{0,80}",
        seed in any::<u64>(),
        error_rate in 0.0f32..1.0,
        variance in 0.0f32..1.0,
        fix_session_probability in 0.0f32..1.0,
    ) {
        let advanced = type_cast::config::AdvancedTypingOptions::builder()
            .fix_session_probability(fix_session_probability)
            .build();
        let options = TypingOptions::builder()
            .error_rate(error_rate)
            .variance(variance)
            .advanced(advanced)
            .build();

        let plan = plan_seeded(&text, &options, seed).unwrap();
        let typed = replay(&plan);
        prop_assert_eq!(typed, plan.normalized_text);
    }

    #[test]
    fn same_seed_and_options_always_produce_the_same_plan(
        text in "[a-zA-Z ]{1,40}",
        seed in any::<u64>(),
    ) {
        let options = TypingOptions::builder().error_rate(0.25).build();
        let a = plan_seeded(&text, &options, seed).unwrap();
        let b = plan_seeded(&text, &options, seed).unwrap();
        prop_assert_eq!(a, b);
    }
}
