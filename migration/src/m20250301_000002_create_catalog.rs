use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // courses
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .col(ColumnDef::new(Courses::AdditionalDescription).text().null())
                    .col(
                        ColumnDef::new(Courses::TargetAudience)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(Courses::Level).string_len(100).not_null())
                    .col(ColumnDef::new(Courses::Duration).string_len(100).not_null())
                    .col(ColumnDef::new(Courses::Price).integer().not_null())
                    .col(ColumnDef::new(Courses::ImageUrl).text().null())
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Courses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // modules
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Modules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Modules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Modules::CourseId).integer().not_null())
                    .col(ColumnDef::new(Modules::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Modules::Description).text().null())
                    .col(ColumnDef::new(Modules::ImageUrl).text().null())
                    .col(ColumnDef::new(Modules::OrderIndex).integer().not_null())
                    .col(
                        ColumnDef::new(Modules::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Modules::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_modules_course_id")
                            .from(Modules::Table, Modules::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // lessons
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Lessons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lessons::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lessons::ModuleId).integer().not_null())
                    .col(ColumnDef::new(Lessons::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Lessons::Description).text().null())
                    .col(ColumnDef::new(Lessons::VideoUrl).text().null())
                    .col(ColumnDef::new(Lessons::ImageUrl).text().null())
                    .col(
                        ColumnDef::new(Lessons::Duration)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Lessons::OrderIndex).integer().not_null())
                    .col(
                        ColumnDef::new(Lessons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Lessons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lessons_module_id")
                            .from(Lessons::Table, Lessons::ModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // equipment / benefits
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(Equipment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Equipment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Equipment::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Equipment::Description).text().null())
                    .col(ColumnDef::new(Equipment::ImageUrl).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Benefits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Benefits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Benefits::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Benefits::Description).text().null())
                    .col(ColumnDef::new(Benefits::ImageUrl).text().null())
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // join tables
        // =====================================================
        manager
            .create_table(equipment_join(
                CourseEquipment::Table,
                CourseEquipment::CourseId,
                Courses::Table,
                Courses::Id,
                "course_equipment",
            ))
            .await?;

        manager
            .create_table(equipment_join(
                ModuleEquipment::Table,
                ModuleEquipment::ModuleId,
                Modules::Table,
                Modules::Id,
                "module_equipment",
            ))
            .await?;

        manager
            .create_table(equipment_join(
                LessonEquipment::Table,
                LessonEquipment::LessonId,
                Lessons::Table,
                Lessons::Id,
                "lesson_equipment",
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseBenefits::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CourseBenefits::CourseId).integer().not_null())
                    .col(ColumnDef::new(CourseBenefits::BenefitId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(CourseBenefits::CourseId)
                            .col(CourseBenefits::BenefitId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_benefits_course_id")
                            .from(CourseBenefits::Table, CourseBenefits::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_benefits_benefit_id")
                            .from(CourseBenefits::Table, CourseBenefits::BenefitId)
                            .to(Benefits::Table, Benefits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================

        // Ordered traversal of the content tree
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX idx_modules_course_order ON modules (course_id, order_index);
                CREATE UNIQUE INDEX idx_lessons_module_order ON lessons (module_id, order_index);
                "#,
            )
            .await?;

        for table in ["courses", "modules", "lessons"] {
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
        for table in ["courses", "modules", "lessons"] {
            manager
                .get_connection()
                .execute_unprepared(&format!(
                    "DROP TRIGGER IF EXISTS update_{table}_updated_at ON {table}"
                ))
                .await?;
        }

        manager
            .drop_table(Table::drop().table(CourseBenefits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LessonEquipment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ModuleEquipment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseEquipment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Benefits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Equipment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lessons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Modules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await
    }
}

/// `<parent>_equipment` join: composite key, quantity and free-form notes.
fn equipment_join<T, P, PT, PI>(
    table: T,
    parent_col: P,
    parent_table: PT,
    parent_id: PI,
    name: &str,
) -> TableCreateStatement
where
    T: IntoIden + Copy + 'static,
    P: IntoIden + Copy + 'static,
    PT: IntoIden + 'static,
    PI: IntoIden + 'static,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(parent_col).integer().not_null())
        .col(ColumnDef::new(JoinColumns::EquipmentId).integer().not_null())
        .col(
            ColumnDef::new(JoinColumns::Quantity)
                .integer()
                .not_null()
                .default(1),
        )
        .col(ColumnDef::new(JoinColumns::Notes).text().null())
        .primary_key(Index::create().col(parent_col).col(JoinColumns::EquipmentId))
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{name}_parent_id"))
                .from(table, parent_col)
                .to(parent_table, parent_id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{name}_equipment_id"))
                .from(table, JoinColumns::EquipmentId)
                .to(Equipment::Table, Equipment::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(DeriveIden)]
pub(crate) enum Courses {
    Table,
    Id,
    Title,
    Description,
    AdditionalDescription,
    TargetAudience,
    Level,
    Duration,
    Price,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Modules {
    Table,
    Id,
    CourseId,
    Title,
    Description,
    ImageUrl,
    OrderIndex,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Lessons {
    Table,
    Id,
    ModuleId,
    Title,
    Description,
    VideoUrl,
    ImageUrl,
    Duration,
    OrderIndex,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Equipment {
    Table,
    Id,
    Name,
    Description,
    ImageUrl,
}

#[derive(DeriveIden)]
enum Benefits {
    Table,
    Id,
    Name,
    Description,
    ImageUrl,
}

#[derive(DeriveIden, Clone, Copy)]
enum CourseEquipment {
    Table,
    CourseId,
}

#[derive(DeriveIden, Clone, Copy)]
enum ModuleEquipment {
    Table,
    ModuleId,
}

#[derive(DeriveIden, Clone, Copy)]
enum LessonEquipment {
    Table,
    LessonId,
}

#[derive(DeriveIden)]
enum JoinColumns {
    EquipmentId,
    Quantity,
    Notes,
}

#[derive(DeriveIden)]
enum CourseBenefits {
    Table,
    CourseId,
    BenefitId,
}
