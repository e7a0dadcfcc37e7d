use std::collections::HashMap;

use anyhow::Result;

use crate::api::client::ApiClient;
use crate::api::{attempts, enrollments, modules, quizzes};
use crate::app::{Flow, Prompt};
use crate::nav::{Navigator, Route};
use crate::schemas::attempt::AttemptSummary;

pub(crate) async fn dashboard(
    client: &ApiClient,
    navigator: &Navigator,
    prompt: &mut Prompt,
) -> Result<Flow> {
    let (catalog, my_courses) =
        match tokio::try_join!(modules::list(client), enrollments::my_courses(client)) {
            Ok(loaded) => loaded,
            Err(err) => {
                println!("Could not load courses: {}", err.user_message());
                return Ok(Flow::Continue);
            }
        };

    println!();
    println!("Student dashboard");
    println!("My courses:");
    if my_courses.is_empty() {
        println!("  (none yet)");
    }
    for (index, enrollment) in my_courses.iter().enumerate() {
        println!(
            "  {}) {} [{}] by {}",
            index + 1,
            enrollment.module.title,
            enrollment.module.subject,
            enrollment.module.teacher_name()
        );
    }
    println!("All modules:");
    for (index, module) in catalog.iter().enumerate() {
        println!(
            "  e{}) {} [{}] by {} — {} quiz(zes)",
            index + 1,
            module.title,
            module.subject,
            module.teacher_name(),
            module.quiz_count()
        );
    }
    println!("  <number>) Open course   e<number>) Enroll   x) Log out   q) Quit");

    match prompt.line("Choose:").await? {
        Some(choice) => match choice.as_str() {
            "x" => {
                client.session().logout();
                navigator.force(Route::Home);
            }
            "q" => return Ok(Flow::Quit),
            other => {
                if let Some(raw) = other.strip_prefix('e') {
                    match raw.parse::<usize>() {
                        Ok(number) if number >= 1 && number <= catalog.len() => {
                            enroll(client, &catalog[number - 1].id).await;
                        }
                        _ => println!("Unknown choice."),
                    }
                } else {
                    match other.parse::<usize>() {
                        Ok(number) if number >= 1 && number <= my_courses.len() => {
                            navigator
                                .goto(Route::StudentModule(my_courses[number - 1].module.id.clone()));
                        }
                        _ => println!("Unknown choice."),
                    }
                }
            }
        },
        None => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

async fn enroll(client: &ApiClient, module_id: &str) {
    // The backend answers an already-enrolled student with a conflict; that
    // message is worth showing as-is.
    match enrollments::enroll(client, module_id).await {
        Ok(()) => println!("Enrolled."),
        Err(err) => println!("Could not enroll: {}", err.user_message()),
    }
}

pub(crate) async fn module_detail(
    client: &ApiClient,
    navigator: &Navigator,
    prompt: &mut Prompt,
    module_id: &str,
) -> Result<Flow> {
    let (module, module_quizzes, my_attempts) = match tokio::try_join!(
        modules::get(client, module_id),
        quizzes::by_module(client, module_id),
        attempts::by_module(client, module_id)
    ) {
        Ok(loaded) => loaded,
        Err(err) => {
            println!("Could not load module: {}", err.user_message());
            navigator.back();
            return Ok(Flow::Continue);
        }
    };

    let history_by_quiz = history_by_quiz(&my_attempts);

    println!();
    println!("{} [{}] by {}", module.title, module.subject, module.teacher_name());
    if !module.description.is_empty() {
        println!("{}", module.description);
    }
    if module_quizzes.is_empty() {
        println!("No quizzes in this module yet.");
    }
    for (index, quiz) in module_quizzes.iter().enumerate() {
        let best = history_by_quiz
            .get(quiz.id.as_str())
            .map(|history| format!("{} attempt(s), best {:.1}%", history.attempts, history.best))
            .unwrap_or_else(|| "not attempted".to_string());
        println!(
            "  {}) {} — {} question(s), {} min, {} pts ({})",
            index + 1,
            quiz.title,
            quiz.questions.len(),
            quiz.duration,
            quiz.total_points,
            best
        );
    }
    println!("  <number>) Take quiz   b) Back   q) Quit");

    match prompt.line("Choose:").await? {
        Some(choice) => match choice.as_str() {
            "b" => navigator.back(),
            "q" => return Ok(Flow::Quit),
            other => match other.parse::<usize>() {
                Ok(number) if number >= 1 && number <= module_quizzes.len() => {
                    navigator.goto(Route::TakeQuiz(module_quizzes[number - 1].id.clone()));
                }
                _ => println!("Unknown choice."),
            },
        },
        None => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

struct QuizHistory {
    attempts: usize,
    best: f64,
}

fn history_by_quiz(my_attempts: &[AttemptSummary]) -> HashMap<&str, QuizHistory> {
    let mut grouped: HashMap<&str, QuizHistory> = HashMap::new();
    for attempt in my_attempts {
        let entry = grouped
            .entry(attempt.quiz.as_str())
            .or_insert(QuizHistory { attempts: 0, best: attempt.percentage });
        entry.attempts += 1;
        if attempt.percentage > entry.best {
            entry.best = attempt.percentage;
        }
    }
    grouped
}
