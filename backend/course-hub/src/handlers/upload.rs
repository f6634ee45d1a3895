/// Multipart form reader for post and course uploads
///
/// Text parts become form fields; the part named `image` becomes the
/// attached blob. Parsing into typed inputs happens here so the services
/// only ever see `PostInput` / `CourseInput`.
use actix_multipart::Multipart;
use futures_util::stream::StreamExt;
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::{CourseInput, CourseType, Image, PostInput};

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    image: Option<Image>,
}

impl UploadForm {
    pub fn new(fields: HashMap<String, String>, image: Option<Image>) -> Self {
        Self { fields, image }
    }

    /// Drain a multipart body, rejecting it once it exceeds `limit` bytes in total
    pub async fn read(mut payload: Multipart, limit: usize) -> Result<Self> {
        let mut form = UploadForm::default();
        let mut total_bytes: usize = 0;
        let mut parts_read: usize = 0;

        while let Some(item) = payload.next().await {
            let mut field = match item {
                Ok(field) => field,
                // A body holding only the closing boundary is an empty form
                Err(e) if parts_read == 0 => {
                    tracing::debug!("multipart body has no parts: {}", e);
                    break;
                }
                Err(e) => {
                    tracing::debug!("malformed multipart body: {}", e);
                    return Err(AppError::Validation(
                        "Malformed multipart body".to_string(),
                    ));
                }
            };
            parts_read += 1;

            let name = field.name().map(str::to_owned).unwrap_or_default();
            let content_type = field.content_type().map(|m| m.to_string());

            let mut data = Vec::new();
            while let Some(chunk) = field.next().await {
                let bytes = chunk.map_err(|e| {
                    tracing::debug!(field = %name, "error reading upload field: {}", e);
                    AppError::Validation("Malformed multipart body".to_string())
                })?;

                total_bytes += bytes.len();
                if total_bytes > limit {
                    return Err(AppError::Validation(format!(
                        "Upload exceeds {} bytes limit",
                        limit
                    )));
                }
                data.extend_from_slice(&bytes);
            }

            if name == IMAGE_FIELD {
                // Browsers send an empty part when no file was picked
                if !data.is_empty() {
                    form.image = Some(Image::new(data, content_type));
                }
            } else if !name.is_empty() {
                let value = String::from_utf8(data).map_err(|_| {
                    AppError::Validation(format!("Field {} must be UTF-8 text", name))
                })?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    fn take(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Optional parsed field; an empty value counts as absent
    fn take_parsed<T, F>(&mut self, name: &str, parse: F) -> Result<Option<T>>
    where
        F: FnOnce(&str) -> Result<T>,
    {
        match self.take(name) {
            Some(raw) if !raw.trim().is_empty() => parse(raw.trim()).map(Some),
            _ => Ok(None),
        }
    }

    pub fn into_post_input(mut self) -> Result<PostInput> {
        let like = self.take_parsed("like", |raw| {
            raw.parse::<i64>()
                .map_err(|_| AppError::Validation("Like must be an integer".to_string()))
        })?;

        Ok(PostInput {
            title: self.take("title"),
            content: self.take("content"),
            like,
            image: self.image,
        })
    }

    pub fn into_course_input(mut self) -> Result<CourseInput> {
        let cost = self.take_parsed("cost", |raw| match raw.parse::<f64>() {
            Ok(cost) if cost.is_finite() => Ok(cost),
            _ => Err(AppError::Validation("Cost must be a number".to_string())),
        })?;
        let course_type = self.take_parsed("type", |raw| {
            raw.parse::<CourseType>()
                .map_err(|_| AppError::Validation("Invalid course type".to_string()))
        })?;

        Ok(CourseInput {
            title: self.take("title"),
            description: self.take("description"),
            url: self.take("url"),
            cost,
            course_type,
            framework: self.take("framework"),
            image: self.image,
        })
    }
}
