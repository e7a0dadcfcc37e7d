use anyhow::Result;
use validator::Validate;

use crate::api::client::ApiClient;
use crate::api::{attempts, modules, quizzes};
use crate::app::{Flow, Prompt};
use crate::core::time::format_offset;
use crate::nav::{Navigator, Route};
use crate::schemas::attempt::AttemptSummary;
use crate::schemas::module::ModuleCreate;
use crate::schemas::quiz::{QuestionKind, Quiz};
use crate::workflow::authoring::{QuestionDraft, QuizDraft};

pub(crate) async fn dashboard(
    client: &ApiClient,
    navigator: &Navigator,
    prompt: &mut Prompt,
) -> Result<Flow> {
    let my_modules = match modules::my_modules(client).await {
        Ok(my_modules) => my_modules,
        Err(err) => {
            println!("Could not load your modules: {}", err.user_message());
            return Ok(Flow::Continue);
        }
    };

    println!();
    println!("Teacher dashboard — {} module(s)", my_modules.len());
    for (index, module) in my_modules.iter().enumerate() {
        println!(
            "  {}) {} [{}] — {} quiz(zes)",
            index + 1,
            module.title,
            module.subject,
            module.quiz_count()
        );
    }
    println!("  n) New module   <number>) Open module   x) Log out   q) Quit");

    match prompt.line("Choose:").await? {
        Some(choice) => match choice.as_str() {
            "n" => create_module(client, navigator, prompt).await?,
            "x" => {
                client.session().logout();
                navigator.force(Route::Home);
            }
            "q" => return Ok(Flow::Quit),
            other => match other.parse::<usize>() {
                Ok(number) if number >= 1 && number <= my_modules.len() => {
                    navigator.goto(Route::TeacherModule(my_modules[number - 1].id.clone()));
                }
                _ => println!("Unknown choice."),
            },
        },
        None => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

async fn create_module(
    client: &ApiClient,
    navigator: &Navigator,
    prompt: &mut Prompt,
) -> Result<()> {
    let Some(title) = prompt.line("Module title:").await? else { return Ok(()) };
    let Some(subject) = prompt.line("Subject:").await? else { return Ok(()) };
    let Some(description) = prompt.line("Description:").await? else { return Ok(()) };

    let payload = ModuleCreate { title, description, subject };
    if let Err(err) = payload.validate() {
        println!("Invalid module: {err}");
        return Ok(());
    }

    match modules::create(client, &payload).await {
        Ok(module) => {
            println!("Module \"{}\" created.", module.title);
            navigator.goto(Route::TeacherModule(module.id));
        }
        Err(err) => println!("Could not create module: {}", err.user_message()),
    }
    Ok(())
}

pub(crate) async fn module_detail(
    client: &ApiClient,
    navigator: &Navigator,
    prompt: &mut Prompt,
    module_id: &str,
) -> Result<Flow> {
    let (module, module_quizzes) = match tokio::try_join!(
        modules::get(client, module_id),
        quizzes::by_module(client, module_id)
    ) {
        Ok(loaded) => loaded,
        Err(err) => {
            println!("Could not load module: {}", err.user_message());
            navigator.back();
            return Ok(Flow::Continue);
        }
    };

    println!();
    println!("{} [{}]", module.title, module.subject);
    if !module.description.is_empty() {
        println!("{}", module.description);
    }
    for (index, quiz) in module_quizzes.iter().enumerate() {
        println!(
            "  {}) {} — {} question(s), {} min, {} pts",
            index + 1,
            quiz.title,
            quiz.questions.len(),
            quiz.duration,
            quiz.total_points
        );
    }
    println!("  n) New quiz   <number>) Quiz results   b) Back   q) Quit");

    match prompt.line("Choose:").await? {
        Some(choice) => match choice.as_str() {
            "n" => create_quiz(client, prompt, module_id).await?,
            "b" => navigator.back(),
            "q" => return Ok(Flow::Quit),
            other => match other.parse::<usize>() {
                Ok(number) if number >= 1 && number <= module_quizzes.len() => {
                    quiz_results(client, &module_quizzes[number - 1]).await;
                }
                _ => println!("Unknown choice."),
            },
        },
        None => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

async fn create_quiz(client: &ApiClient, prompt: &mut Prompt, module_id: &str) -> Result<()> {
    let mut draft = QuizDraft::new();

    let Some(title) = prompt.line("Quiz title:").await? else { return Ok(()) };
    draft.title = title;
    let Some(description) = prompt.line("Description:").await? else { return Ok(()) };
    draft.description = description;
    if let Some(raw) = prompt.line("Duration in minutes (default 10):").await? {
        if let Ok(minutes) = raw.parse::<i64>() {
            draft.duration = minutes;
        }
    } else {
        return Ok(());
    }

    loop {
        println!(
            "Draft: {} question(s), {} point(s) total",
            draft.questions().len(),
            draft.total_points()
        );
        let Some(choice) = prompt.line("a) Add question   s) Save quiz   c) Cancel").await? else {
            return Ok(());
        };
        match choice.as_str() {
            "a" => {
                if let Some(question) = build_question(prompt).await? {
                    match draft.add_question(question) {
                        Ok(()) => println!("Question added."),
                        Err(err) => println!("Question rejected: {err}"),
                    }
                }
            }
            "s" => {
                match draft.clone().into_create(module_id) {
                    Ok(payload) => match quizzes::create(client, &payload).await {
                        Ok(quiz) => {
                            println!("Quiz \"{}\" created.", quiz.title);
                            return Ok(());
                        }
                        Err(err) => println!("Could not create quiz: {}", err.user_message()),
                    },
                    Err(err) => println!("Draft not ready: {err}"),
                }
            }
            "c" => return Ok(()),
            _ => println!("Unknown choice."),
        }
    }
}

async fn build_question(prompt: &mut Prompt) -> Result<Option<QuestionDraft>> {
    let mut draft = QuestionDraft::new();

    let Some(text) = prompt.line("Question text:").await? else { return Ok(None) };
    draft.text = text;

    let Some(kind) = prompt.line("Type (single/multiple):").await? else { return Ok(None) };
    match kind.to_lowercase().as_str() {
        "multiple" | "m" => draft.set_kind(QuestionKind::Multiple),
        _ => draft.set_kind(QuestionKind::Single),
    }

    for index in 0..draft.options.len() {
        let Some(option) = prompt.line(&format!("Option {} (empty to skip):", index + 1)).await?
        else {
            return Ok(None);
        };
        draft.options[index] = option;
    }

    let Some(raw) = prompt
        .line("Correct option number(s), comma separated (e.g. 1 or 1,3):")
        .await?
    else {
        return Ok(None);
    };
    for piece in raw.split(',') {
        if let Ok(number) = piece.trim().parse::<usize>() {
            if number >= 1 {
                draft.mark_correct(number - 1);
            }
        }
    }

    if let Some(raw) = prompt.line("Points (default 1):").await? {
        if let Ok(points) = raw.parse::<i64>() {
            draft.points = points;
        }
    } else {
        return Ok(None);
    }

    Ok(Some(draft))
}

async fn quiz_results(client: &ApiClient, quiz: &Quiz) {
    let submissions = match attempts::teacher_quiz_attempts(client, &quiz.id).await {
        Ok(submissions) => submissions,
        Err(err) => {
            println!("Could not load results: {}", err.user_message());
            return;
        }
    };

    println!();
    println!("Results for \"{}\"", quiz.title);
    if submissions.is_empty() {
        println!("No attempts yet.");
        return;
    }

    for attempt in &submissions {
        let student = attempt
            .student
            .as_ref()
            .map(|student| format!("{} <{}>", student.name, student.email))
            .unwrap_or_else(|| "unknown student".to_string());
        let when = attempt.submitted_at.unwrap_or(attempt.created_at);
        let taken = attempt
            .time_taken
            .map(|seconds| format!(", took {}:{:02}", seconds / 60, seconds % 60))
            .unwrap_or_default();
        println!(
            "  {} — {:.0}/{:.0} ({:.1}%) at {}{}",
            student,
            attempt.score,
            attempt.total_points,
            attempt.percentage,
            format_offset(when),
            taken
        );
    }
    println!("Class average: {:.1}%", average_percentage(&submissions));
}

fn average_percentage(submissions: &[AttemptSummary]) -> f64 {
    if submissions.is_empty() {
        return 0.0;
    }
    submissions.iter().map(|attempt| attempt.percentage).sum::<f64>() / submissions.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_over_all_submissions() {
        let submissions: Vec<AttemptSummary> = serde_json::from_value(serde_json::json!([
            {"_id": "a1", "quiz": "q1", "percentage": 50.0, "createdAt": "2025-03-01T09:00:00Z"},
            {"_id": "a2", "quiz": "q1", "percentage": 100.0, "createdAt": "2025-03-01T10:00:00Z"}
        ]))
        .unwrap();
        assert_eq!(average_percentage(&submissions), 75.0);
        assert_eq!(average_percentage(&[]), 0.0);
    }
}
