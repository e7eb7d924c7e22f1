use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_users_and_tokens::Users;
use crate::m20250301_000002_create_catalog::{Courses, Lessons, Modules};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // course_progress
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(CourseProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseProgress::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseProgress::UserId).uuid().not_null())
                    .col(ColumnDef::new(CourseProgress::CourseId).integer().not_null())
                    .col(
                        ColumnDef::new(CourseProgress::ProgressPercent)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CourseProgress::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(CourseProgress::CurrentModuleId).integer().null())
                    .col(
                        ColumnDef::new(CourseProgress::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CourseProgress::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_progress_user_id")
                            .from(CourseProgress::Table, CourseProgress::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_progress_course_id")
                            .from(CourseProgress::Table, CourseProgress::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_progress_current_module_id")
                            .from(CourseProgress::Table, CourseProgress::CurrentModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // module_progress
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(ModuleProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ModuleProgress::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ModuleProgress::UserId).uuid().not_null())
                    .col(ColumnDef::new(ModuleProgress::ModuleId).integer().not_null())
                    .col(
                        ColumnDef::new(ModuleProgress::IsLocked)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ModuleProgress::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ModuleProgress::ProgressPercent)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ModuleProgress::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ModuleProgress::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_module_progress_user_id")
                            .from(ModuleProgress::Table, ModuleProgress::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_module_progress_module_id")
                            .from(ModuleProgress::Table, ModuleProgress::ModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // lesson_progress
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(LessonProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LessonProgress::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LessonProgress::UserId).uuid().not_null())
                    .col(ColumnDef::new(LessonProgress::LessonId).integer().not_null())
                    .col(
                        ColumnDef::new(LessonProgress::IsLocked)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(LessonProgress::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(LessonProgress::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LessonProgress::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(LessonProgress::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_progress_user_id")
                            .from(LessonProgress::Table, LessonProgress::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_progress_lesson_id")
                            .from(LessonProgress::Table, LessonProgress::LessonId)
                            .to(Lessons::Table, Lessons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per (user, node): the upserts in the progress repository target these.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX uq_course_progress_user_course ON course_progress (user_id, course_id);
                CREATE UNIQUE INDEX uq_module_progress_user_module ON module_progress (user_id, module_id);
                CREATE UNIQUE INDEX uq_lesson_progress_user_lesson ON lesson_progress (user_id, lesson_id);
                "#,
            )
            .await?;

        for table in ["course_progress", "module_progress", "lesson_progress"] {
            manager
                .get_connection()
                .execute_unprepared(&format!(
                    r#"
                    CREATE TRIGGER update_{table}_updated_at
                    BEFORE UPDATE ON {table}
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
                    "#
                ))
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LessonProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ModuleProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseProgress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CourseProgress {
    Table,
    Id,
    UserId,
    CourseId,
    ProgressPercent,
    IsCompleted,
    CurrentModuleId,
    CompletedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ModuleProgress {
    Table,
    Id,
    UserId,
    ModuleId,
    IsLocked,
    IsCompleted,
    ProgressPercent,
    CompletedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LessonProgress {
    Table,
    Id,
    UserId,
    LessonId,
    IsLocked,
    IsCompleted,
    Position,
    CompletedAt,
    UpdatedAt,
}
