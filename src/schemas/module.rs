use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TeacherRef {
    #[serde(default)]
    pub(crate) name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Module {
    #[serde(alias = "_id")]
    pub(crate) id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) subject: String,
    #[serde(default)]
    pub(crate) teacher: Option<TeacherRef>,
    #[serde(default)]
    quizzes: Vec<Value>,
}

impl Module {
    pub(crate) fn quiz_count(&self) -> usize {
        self.quizzes.len()
    }

    pub(crate) fn teacher_name(&self) -> &str {
        self.teacher.as_ref().map(|teacher| teacher.name.as_str()).unwrap_or("unknown")
    }
}

#[derive(Debug, Serialize, Validate)]
pub(crate) struct ModuleCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    pub(crate) description: String,
    #[validate(length(min = 1, message = "subject must not be empty"))]
    pub(crate) subject: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_counts_quiz_references() {
        let module: Module = serde_json::from_value(serde_json::json!({
            "_id": "m1",
            "title": "Algebra",
            "subject": "Mathematics",
            "teacher": {"_id": "t1", "name": "Ada"},
            "quizzes": ["q1", {"_id": "q2"}]
        }))
        .unwrap();
        assert_eq!(module.quiz_count(), 2);
        assert_eq!(module.teacher_name(), "Ada");
    }
}
