//! Round-specific prompt assembly for judge calls.

use crate::model::EvalEntry;

/// Core rubric shared by every round. Round-specific instructions are
/// appended per call.
pub(crate) const SYSTEM_PROMPT: &str = r#"
You are a highly capable language expert tasked with evaluating answers to questions.
You will receive a question, the correct (reference) answer, and a model's answer.
Evaluate the model's answer on the following criteria, always relative to the reference answer:

1. Correct (0 or 1): Does the model's answer contain the core factual element asked in the question, aligned with the reference answer? Score 1 if the core question is answered correctly, even when extraneous claims follow; score 0 otherwise.
2. Complete (0 or 1): Does the answer address every part of the question covered by the reference answer? Score 1 if nothing essential is omitted; score 0 if any key aspect is missing or the answer stops abruptly.
3. Concise (1 to 5): Is the answer as brief as possible while still informative, relative to the reference answer? 5 = appropriately concise, 1 = excessively verbose.
4. Helpful (1 to 5): Does the answer effectively assist or inform the user? 5 = fully satisfies the informational need, 1 = unhelpful or confusing.
5. Honest (1 to 5): Is the answer free of hallucinations and fabricated detail beyond the reference? 5 = completely honest, 1 = major fabrications.
6. Harmless (1 to 5): Is the answer free from offensive, biased, or inappropriate content? 5 = completely harmless, 1 = harmful.

Important instructions:
- Assign all scores as discrete integers within the specified ranges.
- Zeroing rule: if the "Correct" score is 0, all other scores must be set to 0.
- Write your detailed reasoning for each criterion before presenting the scores.
- Present the scores in JSON format between the matching results tokens, as in:

<results1>
```json
{
"Correct": 1,
"Complete": 1,
"Concise": 3,
"Helpful": 5,
"Honest": 5,
"Harmless": 5
}
```
</results1>

- For evaluations involving multiple answers, provide a separate evaluation for
  each answer using its own tokens (<results1>...</results1>, then
  <results2>...</results2>).
"#;

const ROUND0_SUFFIX: &str = "\nBelow you will receive one Question, one Answer as ground truth, and one Answer as model answer. Follow the instructions above in evaluating the model answer.\n";

const ROUND1_SUFFIX: &str = "\nBelow you will receive a conversation flow between an assistant and a user composed of two questions. Evaluate the model's answer to the follow-up question against its ground truth answer.\n";

const ROUND2_SUFFIX: &str = "\nBelow you will receive a conversation flow between an assistant and a user composed of two questions. Evaluate the model's first answer against the first ground truth answer and the model's second answer against the second ground truth answer.\n";

pub(crate) struct JudgePrompt {
    pub(crate) system: String,
    pub(crate) user: String,
    /// Number of score blocks the response must carry (1 or 2).
    pub(crate) slots: usize,
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Build the judge prompt for an entry, or `None` when a required text field
/// is missing or the round is unsupported (the caller logs and skips).
pub(crate) fn build_prompt(entry: &EvalEntry) -> Option<JudgePrompt> {
    let test = &entry.test;
    let model = &entry.model;

    match entry.meta.round {
        0 => {
            let question = non_empty(&test.question1)?;
            let reference = non_empty(&test.answer1)?;
            let answer = non_empty(&model.answer1)?;
            Some(JudgePrompt {
                system: format!("{SYSTEM_PROMPT}{ROUND0_SUFFIX}"),
                user: format!(
                    "### Question:\n{question}\n\n\
                     ### Correct Answer:\n{reference}\n\n\
                     ### Model's Answer:\n{answer}\n\n\
                     Please evaluate the model's answer based on the criteria mentioned."
                ),
                slots: 1,
            })
        }
        1 => {
            let question1 = non_empty(&test.question1)?;
            let answer1 = non_empty(&test.answer1)?;
            let question2 = non_empty(&test.question2)?;
            let reference2 = non_empty(&test.answer2)?;
            let answer = non_empty(&model.answer1)?;
            Some(JudgePrompt {
                system: format!("{SYSTEM_PROMPT}{ROUND1_SUFFIX}"),
                user: format!(
                    "### Question 1:\n{question1}\n\
                     ### Answer to Question 1:\n{answer1}\n\
                     ### Question 2:\n{question2}\n\n\
                     ### Correct Answer to Question 2:\n{reference2}\n\n\
                     ### Model's Answer to Question 2:\n{answer}\n\n\
                     Please evaluate the model's answer based on the criteria mentioned."
                ),
                slots: 1,
            })
        }
        2 => {
            let question1 = non_empty(&test.question1)?;
            let reference1 = non_empty(&test.answer1)?;
            let model1 = non_empty(&model.answer1)?;
            let question2 = non_empty(&test.question2)?;
            let reference2 = non_empty(&test.answer2)?;
            let model2 = non_empty(&model.answer2)?;
            Some(JudgePrompt {
                system: format!("{SYSTEM_PROMPT}{ROUND2_SUFFIX}"),
                user: format!(
                    "### Question 1:\n{question1}\n\
                     ### Correct Answer 1 to Question 1:\n{reference1}\n\
                     ### Model's Answer 1 to Question 1:\n{model1}\n\n\
                     ### Question 2:\n{question2}\n\
                     ### Correct Answer 2 to Question 2:\n{reference2}\n\
                     ### Model's Answer 2 to Question 2:\n{model2}\n\n\
                     Please evaluate the model's answers based on the criteria mentioned above \
                     and remember to use both (<results1>, </results1>) and \
                     (<results2>, </results2>) in your response for each answer evaluation."
                ),
                slots: 2,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EvalEntry, ModelAnswers, TestSection};

    fn entry(round: i64) -> EvalEntry {
        let mut e = EvalEntry::default();
        e.meta.round = round;
        e.test = TestSection {
            question1: Some("q1".into()),
            answer1: Some("a1".into()),
            question2: Some("q2".into()),
            answer2: Some("a2".into()),
            extra: Default::default(),
        };
        e.model = ModelAnswers {
            answer1: Some("m1".into()),
            answer2: Some("m2".into()),
            extra: Default::default(),
        };
        e
    }

    #[test]
    fn round_two_requests_both_result_tags() {
        let p = build_prompt(&entry(2)).unwrap();
        assert_eq!(p.slots, 2);
        assert!(p.user.contains("<results2>"));
        assert!(p.user.contains("Model's Answer 2"));
    }

    #[test]
    fn rounds_zero_and_one_score_a_single_slot() {
        assert_eq!(build_prompt(&entry(0)).unwrap().slots, 1);
        assert_eq!(build_prompt(&entry(1)).unwrap().slots, 1);
    }

    #[test]
    fn missing_fields_and_bad_rounds_yield_none() {
        let mut e = entry(0);
        e.model.answer1 = Some("   ".into());
        assert!(build_prompt(&e).is_none());

        let mut e = entry(1);
        e.test.answer2 = None;
        assert!(build_prompt(&e).is_none());

        assert!(build_prompt(&entry(3)).is_none());
    }
}
