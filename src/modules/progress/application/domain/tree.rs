use std::collections::HashMap;

use super::rows::{CourseProgress, LessonProgress, ModuleProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonNode {
    pub id: i32,
    pub order_index: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNode {
    pub id: i32,
    pub order_index: i32,
    pub lessons: Vec<LessonNode>,
}

/// The ordered content skeleton of one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseTree {
    pub course_id: i32,
    pub modules: Vec<ModuleNode>,
}

impl CourseTree {
    /// Sorts modules and lessons by `order_index`.
    pub fn new(course_id: i32, mut modules: Vec<ModuleNode>) -> Self {
        modules.sort_by_key(|m| m.order_index);
        for module in &mut modules {
            module.lessons.sort_by_key(|l| l.order_index);
        }
        Self { course_id, modules }
    }

    pub fn module_position(&self, module_id: i32) -> Option<usize> {
        self.modules.iter().position(|m| m.id == module_id)
    }

    /// Index of the module holding the lesson, and the lesson's index inside it.
    pub fn lesson_position(&self, lesson_id: i32) -> Option<(usize, usize)> {
        self.modules.iter().enumerate().find_map(|(mi, m)| {
            m.lessons
                .iter()
                .position(|l| l.id == lesson_id)
                .map(|li| (mi, li))
        })
    }
}

/// Stored progress rows of one user within one course.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSnapshot {
    pub course: Option<CourseProgress>,
    pub modules: HashMap<i32, ModuleProgress>,
    pub lessons: HashMap<i32, LessonProgress>,
}

impl ProgressSnapshot {
    pub fn lesson(&self, lesson_id: i32) -> LessonProgress {
        self.lessons
            .get(&lesson_id)
            .cloned()
            .unwrap_or_else(|| LessonProgress::locked(lesson_id))
    }

    pub fn module(&self, module_id: i32) -> ModuleProgress {
        self.modules
            .get(&module_id)
            .cloned()
            .unwrap_or_else(|| ModuleProgress::locked(module_id))
    }
}
