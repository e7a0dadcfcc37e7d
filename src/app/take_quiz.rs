use anyhow::Result;

use crate::api::client::ApiClient;
use crate::app::{Flow, Prompt};
use crate::nav::{Navigator, Route};
use crate::workflow::attempt::{
    AttemptWorkflow, SubmitOutcome, SubmitTrigger, TickOutcome,
};
use crate::workflow::timer::Countdown;

pub(crate) async fn run(
    client: &ApiClient,
    navigator: &Navigator,
    prompt: &mut Prompt,
    quiz_id: &str,
) -> Result<Flow> {
    let mut workflow = match AttemptWorkflow::load(client, quiz_id).await {
        Ok(workflow) => workflow,
        Err(err) => {
            println!("Could not load quiz: {}", err.user_message());
            navigator.back();
            return Ok(Flow::Continue);
        }
    };

    // Start screen.
    let quiz = workflow.quiz();
    println!();
    println!("{}", quiz.title);
    if !quiz.description.is_empty() {
        println!("{}", quiz.description);
    }
    println!(
        "{} question(s), {} minute(s), {} point(s) total",
        quiz.questions.len(),
        quiz.duration,
        quiz.total_points
    );
    println!("Previous attempts: {}", workflow.previous_attempts().len());
    if let Some(best) = workflow.best_percentage() {
        println!("Best score: {best:.1}%");
    }

    let Some(choice) = prompt.line("s) Start attempt   b) Back").await? else {
        return Ok(Flow::Quit);
    };
    if choice != "s" {
        navigator.back();
        return Ok(Flow::Continue);
    }

    let expired_immediately = match workflow.start(client).await {
        Ok(expired) => expired,
        Err(err) => {
            println!("Could not start attempt: {}", err.user_message());
            navigator.back();
            return Ok(Flow::Continue);
        }
    };

    if expired_immediately {
        // Zero-duration quiz: there is no time to answer anything.
        println!("Time is up; submitting your answers.");
        match workflow.submit(client, SubmitTrigger::TimeExpired).await {
            Ok(_) => return show_result(navigator, &workflow),
            // Attempt stays in progress; the command loop below keeps the
            // answers and the submit command live for a retry.
            Err(err) => println!("Submit failed: {}", err.user_message()),
        }
    }

    print_questions(&workflow);
    print_help();

    let mut countdown = Countdown::start();
    loop {
        tokio::select! {
            tick = countdown.recv() => {
                if tick.is_none() {
                    continue;
                }
                match workflow.tick() {
                    TickOutcome::Idle => {}
                    TickOutcome::Counting(remaining) => {
                        // Only announce at round intervals to keep the
                        // terminal usable.
                        if remaining % 60 == 0 || remaining <= 10 {
                            println!("[{}]", format_remaining(remaining));
                        }
                    }
                    TickOutcome::AutoSubmit => {
                        println!("Time is up; submitting your answers.");
                        match workflow.submit(client, SubmitTrigger::TimeExpired).await {
                            Ok(_) => {
                                countdown.stop();
                                return show_result(navigator, &workflow);
                            }
                            Err(err) => {
                                // Same handling as a failed manual submit:
                                // stay in the loop, answers intact, retry via
                                // the submit command.
                                println!("Submit failed: {}", err.user_message());
                            }
                        }
                    }
                }
            }
            line = prompt.next_line() => {
                let Some(line) = line? else {
                    countdown.stop();
                    return Ok(Flow::Quit);
                };
                match parse_command(line.trim()) {
                    Command::Answer { question, option } => {
                        let quiz = workflow.quiz();
                        match quiz.questions.get(question.wrapping_sub(1)) {
                            Some(q) => {
                                let id = q.id.clone();
                                if workflow.toggle_answer(&id, option.wrapping_sub(1)) {
                                    println!(
                                        "Question {question}: selected {:?}",
                                        workflow
                                            .selected(&id)
                                            .iter()
                                            .map(|&o| o + 1)
                                            .collect::<Vec<_>>()
                                    );
                                } else {
                                    println!("That option does not exist.");
                                }
                            }
                            None => println!("That question does not exist."),
                        }
                    }
                    Command::Show => {
                        println!("[{}]", format_remaining(workflow.remaining_seconds()));
                        print_questions(&workflow);
                    }
                    Command::Submit => {
                        let confirmed =
                            prompt.confirm("Are you sure you want to submit?").await?;
                        match workflow
                            .submit(client, SubmitTrigger::Manual { confirmed })
                            .await
                        {
                            Ok(SubmitOutcome::Submitted) => {
                                countdown.stop();
                                return show_result(navigator, &workflow);
                            }
                            Ok(SubmitOutcome::Declined) => {
                                println!("Submission cancelled; the clock is still running.");
                            }
                            Err(err) => {
                                // Attempt stays in progress; retry is allowed.
                                println!("Submit failed: {}", err.user_message());
                            }
                        }
                    }
                    Command::Unknown => print_help(),
                }
            }
        }
    }
}

enum Command {
    Answer { question: usize, option: usize },
    Submit,
    Show,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    match line {
        "submit" => Command::Submit,
        "show" => Command::Show,
        other => {
            let mut parts = other.split_whitespace();
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some("a"), Some(question), Some(option), None) => {
                    match (question.parse(), option.parse()) {
                        (Ok(question), Ok(option)) => Command::Answer { question, option },
                        _ => Command::Unknown,
                    }
                }
                _ => Command::Unknown,
            }
        }
    }
}

fn print_help() {
    println!("Commands: a <question> <option> to toggle an answer, show to review, submit to finish");
}

fn print_questions(workflow: &AttemptWorkflow) {
    for (index, question) in workflow.quiz().questions.iter().enumerate() {
        let selected = workflow.selected(&question.id);
        println!("  {}. {} ({} pt)", index + 1, question.text, question.points);
        for (option_index, option) in question.options.iter().enumerate() {
            let mark = if selected.contains(&option_index) { "x" } else { " " };
            println!("     [{mark}] {}) {option}", option_index + 1);
        }
    }
    println!(
        "Answered {}/{}",
        workflow.answered_count(),
        workflow.quiz().questions.len()
    );
}

fn format_remaining(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn show_result(navigator: &Navigator, workflow: &AttemptWorkflow) -> Result<Flow> {
    if let Some(result) = workflow.result() {
        println!();
        println!(
            "Score: {:.0}/{:.0} ({:.1}%)",
            result.score, result.total_points, result.percentage
        );
        println!(
            "{} correct, {} incorrect",
            result.correct_count(),
            result.incorrect_count()
        );
        for (index, answer) in result.answers.iter().enumerate() {
            let verdict = if answer.is_correct { "correct" } else { "incorrect" };
            println!("  {}: {verdict}", index + 1);
        }
    }
    // Back to the module that owns the quiz, not the stale start screen.
    navigator.replace(Route::StudentModule(workflow.module_id().to_string()));
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse() {
        assert!(matches!(parse_command("submit"), Command::Submit));
        assert!(matches!(parse_command("show"), Command::Show));
        assert!(matches!(
            parse_command("a 2 3"),
            Command::Answer { question: 2, option: 3 }
        ));
        assert!(matches!(parse_command("a two 3"), Command::Unknown));
        assert!(matches!(parse_command(""), Command::Unknown));
    }

    #[test]
    fn remaining_time_formats_as_minutes_and_seconds() {
        assert_eq!(format_remaining(600), "10:00");
        assert_eq!(format_remaining(59), "0:59");
        assert_eq!(format_remaining(0), "0:00");
    }
}
