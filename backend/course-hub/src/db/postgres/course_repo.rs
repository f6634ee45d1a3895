use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::owner_insert_error;
use crate::error::AppError;
use crate::models::{Course, CourseChanges, CourseType, Image, NewCourse, Owner};

/// Course joined with its owner's username
#[derive(Debug, FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    url: String,
    cost: f64,
    course_type: Option<String>,
    framework: Option<String>,
    rate: f64,
    learner: Vec<Uuid>,
    image_data: Option<Vec<u8>>,
    image_content_type: Option<String>,
    posted_by: Uuid,
    owner_username: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CourseRow> for Course {
    type Error = AppError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let course_type = row
            .course_type
            .as_deref()
            .map(str::parse::<CourseType>)
            .transpose()
            .map_err(AppError::Database)?;

        Ok(Course {
            id: row.id,
            title: row.title,
            description: row.description,
            url: row.url,
            cost: row.cost,
            course_type,
            framework: row.framework,
            rate: row.rate,
            learner: row.learner,
            image: Image::from_columns(row.image_data, row.image_content_type),
            posted_by: Owner {
                id: row.posted_by,
                username: row.owner_username,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const COURSE_COLUMNS: &str = "c.id, c.title, c.description, c.url, c.cost, c.course_type, \
     c.framework, c.rate, c.learner, c.image_data, c.image_content_type, c.posted_by, \
     u.username AS owner_username, c.created_at, c.updated_at";

fn with_owner(cte: &str) -> String {
    format!(
        "WITH c AS ({cte} RETURNING *) \
         SELECT {COURSE_COLUMNS} FROM c LEFT JOIN users u ON u.id = c.posted_by"
    )
}

fn convert(row: Option<CourseRow>) -> Result<Option<Course>, AppError> {
    row.map(Course::try_from).transpose()
}

/// List all courses in insertion order
pub async fn list_courses(pool: &PgPool) -> Result<Vec<Course>, AppError> {
    let sql = format!(
        "SELECT {COURSE_COLUMNS} FROM courses c LEFT JOIN users u ON u.id = c.posted_by \
         ORDER BY c.created_at ASC, c.id ASC"
    );

    sqlx::query_as::<_, CourseRow>(&sql)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(Course::try_from)
        .collect()
}

/// Find a course by ID
pub async fn find_course_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Course>, AppError> {
    let sql = format!(
        "SELECT {COURSE_COLUMNS} FROM courses c LEFT JOIN users u ON u.id = c.posted_by \
         WHERE c.id = $1"
    );

    let row = sqlx::query_as::<_, CourseRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    convert(row)
}

/// Create a course owned by `owner`; rating state starts empty
pub async fn create_course(
    pool: &PgPool,
    owner: Uuid,
    course: &NewCourse,
) -> Result<Course, AppError> {
    let sql = with_owner(
        "INSERT INTO courses \
             (title, description, url, cost, course_type, framework, \
              image_data, image_content_type, posted_by) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    );

    let row = sqlx::query_as::<_, CourseRow>(&sql)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.url)
        .bind(course.cost)
        .bind(course.course_type.map(|t| t.as_str()))
        .bind(&course.framework)
        .bind(course.image.as_ref().map(|i| i.data.as_slice()))
        .bind(course.image.as_ref().map(|i| i.content_type.as_str()))
        .bind(owner)
        .fetch_one(pool)
        .await
        .map_err(owner_insert_error)?;
    Course::try_from(row)
}

/// Update a course only if `owner` created it.
/// `rate`, `learner` and `posted_by` are never written here.
pub async fn update_course(
    pool: &PgPool,
    id: Uuid,
    owner: Uuid,
    changes: &CourseChanges,
) -> Result<Option<Course>, AppError> {
    let sql = with_owner(
        "UPDATE courses SET \
             title = $3, \
             description = COALESCE($4, description), \
             url = COALESCE($5, url), \
             cost = COALESCE($6, cost), \
             course_type = COALESCE($7, course_type), \
             framework = COALESCE($8, framework), \
             image_data = COALESCE($9, image_data), \
             image_content_type = CASE WHEN $9 IS NULL THEN image_content_type ELSE $10 END, \
             updated_at = NOW() \
         WHERE id = $1 AND posted_by = $2",
    );

    let row = sqlx::query_as::<_, CourseRow>(&sql)
        .bind(id)
        .bind(owner)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.url)
        .bind(changes.cost)
        .bind(changes.course_type.map(|t| t.as_str()))
        .bind(&changes.framework)
        .bind(changes.image.as_ref().map(|i| i.data.as_slice()))
        .bind(changes.image.as_ref().map(|i| i.content_type.as_str()))
        .fetch_optional(pool)
        .await?;
    convert(row)
}

/// Delete a course only if `owner` created it, returning the removed record
pub async fn delete_course(
    pool: &PgPool,
    id: Uuid,
    owner: Uuid,
) -> Result<Option<Course>, AppError> {
    let sql = with_owner("DELETE FROM courses WHERE id = $1 AND posted_by = $2");

    let row = sqlx::query_as::<_, CourseRow>(&sql)
        .bind(id)
        .bind(owner)
        .fetch_optional(pool)
        .await?;
    convert(row)
}

/// Record `actor`'s rating in one statement.
/// Misses when the course is absent or `actor` already rated it.
pub async fn record_rating(
    pool: &PgPool,
    id: Uuid,
    actor: Uuid,
    rate: f64,
) -> Result<Option<Course>, AppError> {
    let sql = with_owner(
        "UPDATE courses SET \
             rate = $3, \
             learner = array_append(learner, $2), \
             updated_at = NOW() \
         WHERE id = $1 AND NOT ($2 = ANY(learner))",
    );

    let row = sqlx::query_as::<_, CourseRow>(&sql)
        .bind(id)
        .bind(actor)
        .bind(rate)
        .fetch_optional(pool)
        .await?;
    convert(row)
}
