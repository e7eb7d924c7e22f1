//! Unlock cascade.
//!
//! Completing content never touches the database directly: the functions
//! here read a [`CourseTree`] and a [`ProgressSnapshot`] and return the rows
//! to upsert as a [`ProgressPlan`], which the repository applies in a single
//! transaction.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use utoipa::ToSchema;

use super::rows::{CourseProgress, LessonProgress, ModuleProgress};
use super::tree::{CourseTree, ModuleNode, ProgressSnapshot};

/// Rows to upsert, keyed on (user, node).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressPlan {
    pub lessons: Vec<LessonProgress>,
    pub modules: Vec<ModuleProgress>,
    pub course: Option<CourseProgress>,
}

impl ProgressPlan {
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty() && self.modules.is_empty() && self.course.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteLessonResult {
    pub lesson_progress: LessonProgress,
    pub module_completed: bool,
    pub course_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_progress: Option<ModuleProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_progress: Option<CourseProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_lesson_unlocked: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_module_unlocked: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteModuleResult {
    pub module_completed: bool,
    pub module_progress: ModuleProgress,
    pub lessons_completed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_progress: Option<CourseProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_module_unlocked: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CascadeError {
    #[error("Lesson does not belong to this course")]
    UnknownLesson,

    #[error("Module does not belong to this course")]
    UnknownModule,

    #[error("Module has no lessons")]
    EmptyModule,
}

/// Rounded percentage, 0 when there is nothing to count.
pub fn percent(done: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    (done as f64 / total as f64 * 100.0).round() as i32
}

/// Rows created when a user gains access to a course: the course row, the
/// first module and the first lesson of that module, both unlocked.
/// Returns `None` for a course without modules.
pub fn plan_enrollment(tree: &CourseTree) -> Option<ProgressPlan> {
    let first = tree.modules.first()?;

    Some(ProgressPlan {
        lessons: first
            .lessons
            .first()
            .map(|l| vec![LessonProgress::unlocked(l.id)])
            .unwrap_or_default(),
        modules: vec![ModuleProgress::unlocked(first.id)],
        course: Some(CourseProgress::started(tree.course_id, Some(first.id))),
    })
}

pub fn plan_lesson_completion(
    tree: &CourseTree,
    snapshot: &ProgressSnapshot,
    lesson_id: i32,
    now: DateTime<Utc>,
) -> Result<(ProgressPlan, CompleteLessonResult), CascadeError> {
    let (mi, li) = tree
        .lesson_position(lesson_id)
        .ok_or(CascadeError::UnknownLesson)?;
    let module = &tree.modules[mi];

    let mut work = Working::new(tree, snapshot, now);
    work.complete_lesson(lesson_id);

    let next_lesson_unlocked = module.lessons.get(li + 1).map(|next| {
        work.lesson_mut(next.id).is_locked = false;
        next.id
    });

    let mut next_module_unlocked = None;
    let module_completed = work.all_lessons_completed(module);
    if module_completed {
        next_module_unlocked = work.complete_module(mi);
    } else {
        let pct = work.module_percent(module);
        work.module_mut(module.id).progress_percent = pct;
    }
    let course_completed = work.refresh_course();

    let result = CompleteLessonResult {
        lesson_progress: work.lessons[&lesson_id].clone(),
        module_completed,
        course_completed,
        module_progress: Some(work.modules[&module.id].clone()),
        course_progress: Some(work.course.clone()),
        next_lesson_unlocked,
        next_module_unlocked,
    };

    Ok((work.into_plan(), result))
}

pub fn plan_module_completion(
    tree: &CourseTree,
    snapshot: &ProgressSnapshot,
    module_id: i32,
    now: DateTime<Utc>,
) -> Result<(ProgressPlan, CompleteModuleResult), CascadeError> {
    let mi = tree
        .module_position(module_id)
        .ok_or(CascadeError::UnknownModule)?;
    let module = &tree.modules[mi];
    if module.lessons.is_empty() {
        return Err(CascadeError::EmptyModule);
    }

    let mut work = Working::new(tree, snapshot, now);
    for lesson in &module.lessons {
        work.complete_lesson(lesson.id);
    }
    let next_module_unlocked = work.complete_module(mi);
    let course_completed = work.refresh_course();

    let result = CompleteModuleResult {
        module_completed: true,
        module_progress: work.modules[&module.id].clone(),
        lessons_completed: module.lessons.len(),
        course_completed: Some(course_completed),
        course_progress: Some(work.course.clone()),
        next_module_unlocked,
    };

    Ok((work.into_plan(), result))
}

/// Mutable copy of the snapshot that records which rows were changed.
struct Working<'a> {
    tree: &'a CourseTree,
    now: DateTime<Utc>,
    lessons: HashMap<i32, LessonProgress>,
    modules: HashMap<i32, ModuleProgress>,
    course: CourseProgress,
    touched_lessons: BTreeSet<i32>,
    touched_modules: BTreeSet<i32>,
}

impl<'a> Working<'a> {
    fn new(tree: &'a CourseTree, snapshot: &ProgressSnapshot, now: DateTime<Utc>) -> Self {
        let course = snapshot.course.clone().unwrap_or_else(|| {
            CourseProgress::started(tree.course_id, tree.modules.first().map(|m| m.id))
        });

        Self {
            tree,
            now,
            lessons: snapshot.lessons.clone(),
            modules: snapshot.modules.clone(),
            course,
            touched_lessons: BTreeSet::new(),
            touched_modules: BTreeSet::new(),
        }
    }

    fn lesson_mut(&mut self, id: i32) -> &mut LessonProgress {
        self.touched_lessons.insert(id);
        self.lessons
            .entry(id)
            .or_insert_with(|| LessonProgress::locked(id))
    }

    fn module_mut(&mut self, id: i32) -> &mut ModuleProgress {
        self.touched_modules.insert(id);
        self.modules
            .entry(id)
            .or_insert_with(|| ModuleProgress::locked(id))
    }

    fn complete_lesson(&mut self, id: i32) {
        let now = self.now;
        let row = self.lesson_mut(id);
        row.is_locked = false;
        row.position = 0;
        if !row.is_completed {
            row.is_completed = true;
            row.completed_at = Some(now);
        }
    }

    fn lesson_completed(&self, id: i32) -> bool {
        self.lessons.get(&id).is_some_and(|l| l.is_completed)
    }

    fn all_lessons_completed(&self, module: &ModuleNode) -> bool {
        !module.lessons.is_empty() && module.lessons.iter().all(|l| self.lesson_completed(l.id))
    }

    fn module_percent(&self, module: &ModuleNode) -> i32 {
        if self.modules.get(&module.id).is_some_and(|m| m.is_completed) {
            return 100;
        }
        let done = module
            .lessons
            .iter()
            .filter(|l| self.lesson_completed(l.id))
            .count();
        percent(done, module.lessons.len())
    }

    /// Marks the module at `index` completed and opens the next one.
    fn complete_module(&mut self, index: usize) -> Option<i32> {
        let tree = self.tree;
        let now = self.now;

        let row = self.module_mut(tree.modules[index].id);
        row.is_locked = false;
        row.progress_percent = 100;
        if !row.is_completed {
            row.is_completed = true;
            row.completed_at = Some(now);
        }

        let next = tree.modules.get(index + 1)?;
        self.module_mut(next.id).is_locked = false;
        if let Some(first) = next.lessons.first() {
            self.lesson_mut(first.id).is_locked = false;
        }
        self.course.current_module_id = Some(next.id);
        Some(next.id)
    }

    /// Recomputes the course row; a completed course stays completed.
    fn refresh_course(&mut self) -> bool {
        if self.course.is_completed {
            return true;
        }

        let tree = self.tree;
        let modules = &tree.modules;
        let all_done = !modules.is_empty()
            && modules
                .iter()
                .all(|m| self.modules.get(&m.id).is_some_and(|p| p.is_completed));

        if all_done {
            self.course.is_completed = true;
            self.course.progress_percent = 100;
            self.course.completed_at = Some(self.now);
        } else if !modules.is_empty() {
            let total: i32 = modules.iter().map(|m| self.module_percent(m)).sum();
            self.course.progress_percent =
                (total as f64 / modules.len() as f64).round() as i32;
        }
        all_done
    }

    fn into_plan(self) -> ProgressPlan {
        let Working {
            mut lessons,
            mut modules,
            course,
            touched_lessons,
            touched_modules,
            ..
        } = self;

        ProgressPlan {
            lessons: touched_lessons
                .iter()
                .filter_map(|id| lessons.remove(id))
                .collect(),
            modules: touched_modules
                .iter()
                .filter_map(|id| modules.remove(id))
                .collect(),
            course: Some(course),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::progress::application::domain::tree::LessonNode;

    /// Course 1: module 10 (lessons 100, 101), module 20 (lessons 200, 201, 202).
    fn tree() -> CourseTree {
        CourseTree::new(
            1,
            vec![
                ModuleNode {
                    id: 20,
                    order_index: 2,
                    lessons: vec![
                        LessonNode { id: 202, order_index: 3 },
                        LessonNode { id: 200, order_index: 1 },
                        LessonNode { id: 201, order_index: 2 },
                    ],
                },
                ModuleNode {
                    id: 10,
                    order_index: 1,
                    lessons: vec![
                        LessonNode { id: 100, order_index: 1 },
                        LessonNode { id: 101, order_index: 2 },
                    ],
                },
            ],
        )
    }

    fn enrolled() -> ProgressSnapshot {
        let plan = plan_enrollment(&tree()).unwrap();
        ProgressSnapshot {
            course: plan.course,
            modules: plan.modules.into_iter().map(|m| (m.module_id, m)).collect(),
            lessons: plan.lessons.into_iter().map(|l| (l.lesson_id, l)).collect(),
        }
    }

    fn apply(snapshot: &mut ProgressSnapshot, plan: ProgressPlan) {
        for l in plan.lessons {
            snapshot.lessons.insert(l.lesson_id, l);
        }
        for m in plan.modules {
            snapshot.modules.insert(m.module_id, m);
        }
        if plan.course.is_some() {
            snapshot.course = plan.course;
        }
    }

    #[test]
    fn test_tree_is_ordered() {
        let t = tree();
        assert_eq!(t.modules[0].id, 10);
        let ids: Vec<i32> = t.modules[1].lessons.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![200, 201, 202]);
    }

    #[test]
    fn test_enrollment_opens_first_module_and_lesson_only() {
        let plan = plan_enrollment(&tree()).unwrap();

        assert_eq!(plan.modules, vec![ModuleProgress::unlocked(10)]);
        assert_eq!(plan.lessons, vec![LessonProgress::unlocked(100)]);
        assert_eq!(plan.course.unwrap().current_module_id, Some(10));
    }

    #[test]
    fn test_enrollment_without_modules() {
        assert!(plan_enrollment(&CourseTree::new(5, vec![])).is_none());
    }

    #[test]
    fn test_first_lesson_unlocks_second() {
        let now = Utc::now();
        let (plan, result) = plan_lesson_completion(&tree(), &enrolled(), 100, now).unwrap();

        assert!(result.lesson_progress.is_completed);
        assert_eq!(result.lesson_progress.completed_at, Some(now));
        assert_eq!(result.next_lesson_unlocked, Some(101));
        assert!(!result.module_completed);
        assert_eq!(result.module_progress.unwrap().progress_percent, 50);
        // mean of 50 and 0
        assert_eq!(result.course_progress.unwrap().progress_percent, 25);

        let touched: Vec<i32> = plan.lessons.iter().map(|l| l.lesson_id).collect();
        assert_eq!(touched, vec![100, 101]);
        assert!(!plan.lessons[1].is_locked);
    }

    #[test]
    fn test_last_lesson_completes_module_and_opens_next() {
        let mut snapshot = enrolled();
        let (plan, _) = plan_lesson_completion(&tree(), &snapshot, 100, Utc::now()).unwrap();
        apply(&mut snapshot, plan);

        let (plan, result) = plan_lesson_completion(&tree(), &snapshot, 101, Utc::now()).unwrap();

        assert!(result.module_completed);
        assert_eq!(result.next_lesson_unlocked, None);
        assert_eq!(result.next_module_unlocked, Some(20));
        assert_eq!(result.module_progress.unwrap().progress_percent, 100);
        let course = result.course_progress.unwrap();
        assert_eq!(course.current_module_id, Some(20));
        assert_eq!(course.progress_percent, 50);
        assert!(!result.course_completed);

        assert!(plan
            .lessons
            .iter()
            .any(|l| l.lesson_id == 200 && !l.is_locked && !l.is_completed));
        assert!(plan
            .modules
            .iter()
            .any(|m| m.module_id == 20 && !m.is_locked));
    }

    #[test]
    fn test_completing_every_module_completes_course() {
        let t = tree();
        let mut snapshot = enrolled();
        let (plan, _) = plan_module_completion(&t, &snapshot, 10, Utc::now()).unwrap();
        apply(&mut snapshot, plan);

        let (_, result) = plan_module_completion(&t, &snapshot, 20, Utc::now()).unwrap();

        assert_eq!(result.lessons_completed, 3);
        assert_eq!(result.course_completed, Some(true));
        assert_eq!(result.next_module_unlocked, None);
        let course = result.course_progress.unwrap();
        assert!(course.is_completed);
        assert_eq!(course.progress_percent, 100);
    }

    #[test]
    fn test_module_percent_rounds() {
        let t = tree();
        let mut snapshot = enrolled();
        let (plan, _) = plan_module_completion(&t, &snapshot, 10, Utc::now()).unwrap();
        apply(&mut snapshot, plan);

        let (_, result) = plan_lesson_completion(&t, &snapshot, 200, Utc::now()).unwrap();

        // 1 of 3 lessons
        assert_eq!(result.module_progress.unwrap().progress_percent, 33);
        // (100 + 33) / 2 = 66.5
        assert_eq!(result.course_progress.unwrap().progress_percent, 67);
    }

    #[test]
    fn test_recompleting_keeps_first_completion_time() {
        let t = tree();
        let mut snapshot = enrolled();
        let first = Utc::now() - chrono::Duration::days(1);
        let (plan, _) = plan_lesson_completion(&t, &snapshot, 100, first).unwrap();
        apply(&mut snapshot, plan);

        let (_, result) = plan_lesson_completion(&t, &snapshot, 100, Utc::now()).unwrap();

        assert_eq!(result.lesson_progress.completed_at, Some(first));
    }

    #[test]
    fn test_unknown_nodes_and_empty_module() {
        let t = CourseTree::new(
            1,
            vec![ModuleNode {
                id: 10,
                order_index: 1,
                lessons: vec![],
            }],
        );
        let snapshot = ProgressSnapshot::default();

        assert_eq!(
            plan_lesson_completion(&t, &snapshot, 999, Utc::now()).unwrap_err(),
            CascadeError::UnknownLesson
        );
        assert_eq!(
            plan_module_completion(&t, &snapshot, 999, Utc::now()).unwrap_err(),
            CascadeError::UnknownModule
        );
        assert_eq!(
            plan_module_completion(&t, &snapshot, 10, Utc::now()).unwrap_err(),
            CascadeError::EmptyModule
        );
    }

    #[test]
    fn test_percent_of_nothing_is_zero() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(2, 3), 67);
    }
}
