use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_users_and_tokens::Users;
use crate::m20250301_000002_create_catalog::Courses;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(review_table(GeneralReviews::Table, None))
            .await?;

        manager
            .create_table(review_table(CourseReviews::Table, Some(CourseReviews::CourseId)))
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE general_reviews
                ADD CONSTRAINT chk_general_reviews_rating CHECK (rating BETWEEN 1 AND 5);
                ALTER TABLE course_reviews
                ADD CONSTRAINT chk_course_reviews_rating CHECK (rating BETWEEN 1 AND 5);

                CREATE INDEX idx_general_reviews_created_at ON general_reviews (created_at DESC);
                CREATE INDEX idx_course_reviews_course_id ON course_reviews (course_id, created_at DESC);

                CREATE TRIGGER update_general_reviews_updated_at
                BEFORE UPDATE ON general_reviews
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();

                CREATE TRIGGER update_course_reviews_updated_at
                BEFORE UPDATE ON course_reviews
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseReviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GeneralReviews::Table).to_owned())
            .await
    }
}

fn review_table<T>(table: T, course_col: Option<CourseReviews>) -> TableCreateStatement
where
    T: IntoIden + Copy + 'static,
{
    let mut stmt = Table::create();
    stmt.table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(ReviewColumns::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(ReviewColumns::UserId).uuid().null())
        .col(ColumnDef::new(ReviewColumns::Rating).small_integer().not_null())
        .col(ColumnDef::new(ReviewColumns::Comment).text().not_null())
        .col(ColumnDef::new(ReviewColumns::BeforePhotoUrl).text().null())
        .col(ColumnDef::new(ReviewColumns::AfterPhotoUrl).text().null())
        .col(ColumnDef::new(ReviewColumns::AuthorName).string_len(100).null())
        .col(ColumnDef::new(ReviewColumns::AuthorSurname).string_len(100).null())
        .col(ColumnDef::new(ReviewColumns::AuthorExperience).text().null())
        .col(ColumnDef::new(ReviewColumns::AuthorSex).string_len(10).null())
        .col(
            ColumnDef::new(ReviewColumns::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(ReviewColumns::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, ReviewColumns::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::SetNull),
        );

    if let Some(course_col) = course_col {
        stmt.col(ColumnDef::new(course_col).integer().not_null())
            .foreign_key(
                ForeignKey::create()
                    .from(table, CourseReviews::CourseId)
                    .to(Courses::Table, Courses::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
    }

    stmt.to_owned()
}

#[derive(DeriveIden, Clone, Copy)]
enum GeneralReviews {
    Table,
}

#[derive(DeriveIden, Clone, Copy)]
enum CourseReviews {
    Table,
    CourseId,
}

#[derive(DeriveIden)]
enum ReviewColumns {
    Id,
    UserId,
    Rating,
    Comment,
    BeforePhotoUrl,
    AfterPhotoUrl,
    AuthorName,
    AuthorSurname,
    AuthorExperience,
    AuthorSex,
    CreatedAt,
    UpdatedAt,
}
