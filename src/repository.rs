use async_trait::async_trait;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use sqlx::{QueryBuilder, Sqlite, SqlitePool, sqlite::SqliteRow};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    AdminUser, BlogArticle, BookingInquiry, BookingStatus, Category, CmsSettings,
    ContactStatus, ContactSubmission, CreateArticleRequest, CreateBookingRequest,
    CreateCategoryRequest, CreateContactRequest, CreateCreditationRequest, CreateFaqRequest,
    CreateGalleryImageRequest, CreatePackageRequest, CreatePartnerRequest, Creditation, Faq,
    GalleryImage, Partner, TravelPackage, UpdateArticleRequest, UpdateCategoryRequest,
    UpdateCreditationRequest, UpdateFaqRequest, UpdateGalleryImageRequest, UpdatePackageRequest,
    UpdatePartnerRequest, UpdateSettingsRequest,
};

/// Resource
///
/// Static schema description shared by every stored entity. The generic
/// `list`/`get`/`delete` functions below and the catalog router are written
/// once against this trait instead of being copy-pasted per resource.
pub trait Resource:
    for<'r> sqlx::FromRow<'r, SqliteRow> + Serialize + Send + Sync + Unpin + 'static
{
    /// Backing table.
    const TABLE: &'static str;
    /// Column used for descending recency ordering in listings.
    const RECENCY: &'static str;
    /// Display name used in not-found and deletion messages.
    const NAME: &'static str;

    /// Maps a query-string key to a column for the single equality filter a
    /// listing supports. Unknown keys are ignored.
    fn filter_column(key: &str) -> Option<&'static str> {
        let _ = key;
        None
    }
}

/// CatalogResource
///
/// The mutation half of the contract, implemented by the seven catalog
/// entities managed through the generic CRUD router. Inbox entities
/// (contact, bookings) implement only [`Resource`] and keep their own
/// insert/status paths.
#[async_trait]
pub trait CatalogResource: Resource {
    type Create: DeserializeOwned + Send + 'static;
    type Update: DeserializeOwned + Send + 'static;

    /// Presence check over the resource's required fields.
    fn validate(create: &Self::Create) -> Result<(), ApiError>;

    /// Persists a new row with a fresh id and server-set timestamps and
    /// returns the full entity.
    async fn insert(pool: &SqlitePool, create: Self::Create) -> Result<Self, ApiError>;

    /// Merges only the provided fields into an existing row. Returns `None`
    /// when the id does not exist.
    async fn apply_update(
        pool: &SqlitePool,
        id: Uuid,
        update: Self::Update,
    ) -> Result<Option<Self>, ApiError>;
}

/// True when a required field is present and non-empty.
fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

// --- Generic read/delete operations ---

/// Lists all rows of a resource, newest first, optionally narrowed by the
/// single equality predicate the resource declares.
pub async fn list<R: Resource>(
    pool: &SqlitePool,
    params: &HashMap<String, String>,
) -> Result<Vec<R>, ApiError> {
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT * FROM {}", R::TABLE));

    let predicate = params
        .iter()
        .find_map(|(key, value)| R::filter_column(key).map(|column| (column, value.clone())));

    if let Some((column, value)) = predicate {
        builder.push(" WHERE ");
        builder.push(column);
        builder.push(" = ");
        builder.push_bind(value);
    }

    builder.push(format!(" ORDER BY {} DESC", R::RECENCY));

    let rows = builder.build_query_as::<R>().fetch_all(pool).await?;
    Ok(rows)
}

/// Fetches a single row by id.
pub async fn get<R: Resource>(pool: &SqlitePool, id: Uuid) -> Result<Option<R>, ApiError> {
    let row = sqlx::query_as::<_, R>(&format!("SELECT * FROM {} WHERE id = ?", R::TABLE))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Deletes a row by id. Returns false when no row matched.
pub async fn delete<R: Resource>(pool: &SqlitePool, id: Uuid) -> Result<bool, ApiError> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", R::TABLE))
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// --- Catalog resource schemas ---

impl Resource for TravelPackage {
    const TABLE: &'static str = "travel_packages";
    const RECENCY: &'static str = "created_at";
    const NAME: &'static str = "Package";

    fn filter_column(key: &str) -> Option<&'static str> {
        (key == "category").then_some("category")
    }
}

#[async_trait]
impl CatalogResource for TravelPackage {
    type Create = CreatePackageRequest;
    type Update = UpdatePackageRequest;

    fn validate(create: &Self::Create) -> Result<(), ApiError> {
        let required = [
            &create.title,
            &create.description,
            &create.price,
            &create.duration,
            &create.category,
            &create.details,
        ];
        if required.into_iter().all(present) {
            Ok(())
        } else {
            Err(ApiError::missing_fields())
        }
    }

    async fn insert(pool: &SqlitePool, create: Self::Create) -> Result<Self, ApiError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Self>(
            "INSERT INTO travel_packages \
             (id, title, description, price, duration, image, category, details, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(create.title.unwrap_or_default())
        .bind(create.description.unwrap_or_default())
        .bind(create.price.unwrap_or_default())
        .bind(create.duration.unwrap_or_default())
        .bind(create.image.unwrap_or_default())
        .bind(create.category.unwrap_or_default())
        .bind(create.details.unwrap_or_default())
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    async fn apply_update(
        pool: &SqlitePool,
        id: Uuid,
        update: Self::Update,
    ) -> Result<Option<Self>, ApiError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE travel_packages SET \
             title = COALESCE(?, title), \
             description = COALESCE(?, description), \
             price = COALESCE(?, price), \
             duration = COALESCE(?, duration), \
             image = COALESCE(?, image), \
             category = COALESCE(?, category), \
             details = COALESCE(?, details), \
             updated_at = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(update.title)
        .bind(update.description)
        .bind(update.price)
        .bind(update.duration)
        .bind(update.image)
        .bind(update.category)
        .bind(update.details)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

impl Resource for BlogArticle {
    const TABLE: &'static str = "blog_articles";
    // Editorial date, not row creation time.
    const RECENCY: &'static str = "date";
    const NAME: &'static str = "Article";
}

#[async_trait]
impl CatalogResource for BlogArticle {
    type Create = CreateArticleRequest;
    type Update = UpdateArticleRequest;

    fn validate(create: &Self::Create) -> Result<(), ApiError> {
        let required = [&create.title, &create.excerpt, &create.content, &create.author];
        if required.into_iter().all(present) {
            Ok(())
        } else {
            Err(ApiError::missing_fields())
        }
    }

    async fn insert(pool: &SqlitePool, create: Self::Create) -> Result<Self, ApiError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Self>(
            "INSERT INTO blog_articles \
             (id, title, excerpt, content, image, date, author, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(create.title.unwrap_or_default())
        .bind(create.excerpt.unwrap_or_default())
        .bind(create.content.unwrap_or_default())
        .bind(create.image.unwrap_or_default())
        .bind(now)
        .bind(create.author.unwrap_or_default())
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    async fn apply_update(
        pool: &SqlitePool,
        id: Uuid,
        update: Self::Update,
    ) -> Result<Option<Self>, ApiError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE blog_articles SET \
             title = COALESCE(?, title), \
             excerpt = COALESCE(?, excerpt), \
             content = COALESCE(?, content), \
             image = COALESCE(?, image), \
             author = COALESCE(?, author), \
             updated_at = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(update.title)
        .bind(update.excerpt)
        .bind(update.content)
        .bind(update.image)
        .bind(update.author)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

impl Resource for GalleryImage {
    const TABLE: &'static str = "gallery_images";
    const RECENCY: &'static str = "created_at";
    const NAME: &'static str = "Image";
}

#[async_trait]
impl CatalogResource for GalleryImage {
    type Create = CreateGalleryImageRequest;
    type Update = UpdateGalleryImageRequest;

    fn validate(create: &Self::Create) -> Result<(), ApiError> {
        let required = [&create.url, &create.title, &create.description];
        if required.into_iter().all(present) {
            Ok(())
        } else {
            Err(ApiError::missing_fields())
        }
    }

    async fn insert(pool: &SqlitePool, create: Self::Create) -> Result<Self, ApiError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Self>(
            "INSERT INTO gallery_images (id, url, title, description, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(create.url.unwrap_or_default())
        .bind(create.title.unwrap_or_default())
        .bind(create.description.unwrap_or_default())
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    async fn apply_update(
        pool: &SqlitePool,
        id: Uuid,
        update: Self::Update,
    ) -> Result<Option<Self>, ApiError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE gallery_images SET \
             url = COALESCE(?, url), \
             title = COALESCE(?, title), \
             description = COALESCE(?, description), \
             updated_at = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(update.url)
        .bind(update.title)
        .bind(update.description)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

impl Resource for Faq {
    const TABLE: &'static str = "faqs";
    const RECENCY: &'static str = "created_at";
    const NAME: &'static str = "FAQ";
}

#[async_trait]
impl CatalogResource for Faq {
    type Create = CreateFaqRequest;
    type Update = UpdateFaqRequest;

    fn validate(create: &Self::Create) -> Result<(), ApiError> {
        if present(&create.question) && present(&create.answer) {
            Ok(())
        } else {
            Err(ApiError::missing_fields())
        }
    }

    async fn insert(pool: &SqlitePool, create: Self::Create) -> Result<Self, ApiError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Self>(
            "INSERT INTO faqs (id, question, answer, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(create.question.unwrap_or_default())
        .bind(create.answer.unwrap_or_default())
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    async fn apply_update(
        pool: &SqlitePool,
        id: Uuid,
        update: Self::Update,
    ) -> Result<Option<Self>, ApiError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE faqs SET \
             question = COALESCE(?, question), \
             answer = COALESCE(?, answer), \
             updated_at = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(update.question)
        .bind(update.answer)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

impl Resource for Partner {
    const TABLE: &'static str = "partners";
    const RECENCY: &'static str = "created_at";
    const NAME: &'static str = "Partner";

    fn filter_column(key: &str) -> Option<&'static str> {
        (key == "type").then_some("type")
    }
}

#[async_trait]
impl CatalogResource for Partner {
    type Create = CreatePartnerRequest;
    type Update = UpdatePartnerRequest;

    fn validate(create: &Self::Create) -> Result<(), ApiError> {
        let required = [&create.name, &create.logo, &create.partner_type];
        if required.into_iter().all(present) {
            Ok(())
        } else {
            Err(ApiError::missing_fields())
        }
    }

    async fn insert(pool: &SqlitePool, create: Self::Create) -> Result<Self, ApiError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Self>(
            "INSERT INTO partners (id, name, logo, type, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(create.name.unwrap_or_default())
        .bind(create.logo.unwrap_or_default())
        .bind(create.partner_type.unwrap_or_default())
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    async fn apply_update(
        pool: &SqlitePool,
        id: Uuid,
        update: Self::Update,
    ) -> Result<Option<Self>, ApiError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE partners SET \
             name = COALESCE(?, name), \
             logo = COALESCE(?, logo), \
             type = COALESCE(?, type), \
             updated_at = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(update.name)
        .bind(update.logo)
        .bind(update.partner_type)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

impl Resource for Category {
    const TABLE: &'static str = "categories";
    const RECENCY: &'static str = "created_at";
    const NAME: &'static str = "Category";
}

#[async_trait]
impl CatalogResource for Category {
    type Create = CreateCategoryRequest;
    type Update = UpdateCategoryRequest;

    fn validate(create: &Self::Create) -> Result<(), ApiError> {
        if present(&create.name) && present(&create.slug) {
            Ok(())
        } else {
            Err(ApiError::missing_fields())
        }
    }

    async fn insert(pool: &SqlitePool, create: Self::Create) -> Result<Self, ApiError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Self>(
            "INSERT INTO categories (id, name, slug, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(create.name.unwrap_or_default())
        .bind(create.slug.unwrap_or_default())
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    async fn apply_update(
        pool: &SqlitePool,
        id: Uuid,
        update: Self::Update,
    ) -> Result<Option<Self>, ApiError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE categories SET \
             name = COALESCE(?, name), \
             slug = COALESCE(?, slug), \
             updated_at = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(update.name)
        .bind(update.slug)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

impl Resource for Creditation {
    const TABLE: &'static str = "creditations";
    const RECENCY: &'static str = "created_at";
    const NAME: &'static str = "Creditation";
}

#[async_trait]
impl CatalogResource for Creditation {
    type Create = CreateCreditationRequest;
    type Update = UpdateCreditationRequest;

    fn validate(create: &Self::Create) -> Result<(), ApiError> {
        if present(&create.name) && present(&create.icon) {
            Ok(())
        } else {
            Err(ApiError::missing_fields())
        }
    }

    async fn insert(pool: &SqlitePool, create: Self::Create) -> Result<Self, ApiError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Self>(
            "INSERT INTO creditations (id, name, icon, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(create.name.unwrap_or_default())
        .bind(create.icon.unwrap_or_default())
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    async fn apply_update(
        pool: &SqlitePool,
        id: Uuid,
        update: Self::Update,
    ) -> Result<Option<Self>, ApiError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE creditations SET \
             name = COALESCE(?, name), \
             icon = COALESCE(?, icon), \
             updated_at = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(update.name)
        .bind(update.icon)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

// --- Inbox resources (read/delete side only; writes below) ---

impl Resource for ContactSubmission {
    const TABLE: &'static str = "contact_submissions";
    const RECENCY: &'static str = "submitted_at";
    const NAME: &'static str = "Submission";
}

impl Resource for BookingInquiry {
    const TABLE: &'static str = "booking_inquiries";
    const RECENCY: &'static str = "submitted_at";
    const NAME: &'static str = "Booking";

    fn filter_column(key: &str) -> Option<&'static str> {
        (key == "status").then_some("status")
    }
}

/// Admin account persistence.
pub mod users {
    use super::*;

    pub async fn get_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<AdminUser>, ApiError> {
        let user = sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// True when the username or the email is already taken.
    pub async fn exists(pool: &SqlitePool, username: &str, email: &str) -> Result<bool, ApiError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM admin_users WHERE username = ? OR email = ?",
        )
        .bind(username)
        .bind(email)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<AdminUser, ApiError> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, AdminUser>(
            "INSERT INTO admin_users (id, username, email, password_hash, role, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;
        Ok(user)
    }

    /// Removes every admin account. Used by the seed tool.
    pub async fn delete_all(pool: &SqlitePool) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM admin_users").execute(pool).await?;
        Ok(())
    }
}

/// Singleton site settings.
pub mod settings {
    use super::*;

    pub async fn get(pool: &SqlitePool) -> Result<Option<CmsSettings>, ApiError> {
        let row = sqlx::query_as::<_, CmsSettings>("SELECT * FROM cms_settings LIMIT 1")
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Upsert-to-singleton: merges into the existing row when one exists,
    /// otherwise creates it with defaults for anything not provided.
    ///
    /// Read-then-write with no transaction; two concurrent first writers can
    /// race into two rows. Known limitation, inherited deliberately.
    pub async fn upsert(
        pool: &SqlitePool,
        update: UpdateSettingsRequest,
    ) -> Result<CmsSettings, ApiError> {
        match get(pool).await? {
            Some(existing) => {
                let row = sqlx::query_as::<_, CmsSettings>(
                    "UPDATE cms_settings SET \
                     company_name = COALESCE(?, company_name), \
                     company_email = COALESCE(?, company_email), \
                     company_phone = COALESCE(?, company_phone), \
                     whatsapp_number = COALESCE(?, whatsapp_number), \
                     about_content = COALESCE(?, about_content), \
                     facebook = COALESCE(?, facebook), \
                     instagram = COALESCE(?, instagram), \
                     twitter = COALESCE(?, twitter), \
                     linkedin = COALESCE(?, linkedin), \
                     updated_at = ? \
                     WHERE id = ? RETURNING *",
                )
                .bind(update.company_name)
                .bind(update.company_email)
                .bind(update.company_phone)
                .bind(update.whatsapp_number)
                .bind(update.about_content)
                .bind(update.facebook)
                .bind(update.instagram)
                .bind(update.twitter)
                .bind(update.linkedin)
                .bind(Utc::now())
                .bind(existing.id)
                .fetch_one(pool)
                .await?;
                Ok(row)
            }
            None => {
                let row = sqlx::query_as::<_, CmsSettings>(
                    "INSERT INTO cms_settings \
                     (id, company_name, company_email, company_phone, whatsapp_number, \
                      about_content, facebook, instagram, twitter, linkedin, updated_at) \
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
                )
                .bind(Uuid::new_v4())
                .bind(
                    update
                        .company_name
                        .unwrap_or_else(|| "Savanna Trails Tours & Travel".to_string()),
                )
                .bind(
                    update
                        .company_email
                        .unwrap_or_else(|| "info@savannatrails.example".to_string()),
                )
                .bind(update.company_phone.unwrap_or_else(|| "+256 700 000 000".to_string()))
                .bind(update.whatsapp_number.unwrap_or_else(|| "+256 700 000 000".to_string()))
                .bind(update.about_content.unwrap_or_default())
                .bind(update.facebook)
                .bind(update.instagram)
                .bind(update.twitter)
                .bind(update.linkedin)
                .bind(Utc::now())
                .fetch_one(pool)
                .await?;
                Ok(row)
            }
        }
    }
}

/// Customer-facing submissions: contact messages and booking inquiries.
pub mod inbox {
    use super::*;

    pub async fn insert_contact(
        pool: &SqlitePool,
        create: CreateContactRequest,
    ) -> Result<ContactSubmission, ApiError> {
        if !(present(&create.name) && present(&create.email) && present(&create.message)) {
            return Err(ApiError::Validation(
                "Name, email, and message are required".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, ContactSubmission>(
            "INSERT INTO contact_submissions (id, name, email, phone, message, status, submitted_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(create.name.unwrap_or_default())
        .bind(create.email.unwrap_or_default())
        .bind(create.phone.unwrap_or_default())
        .bind(create.message.unwrap_or_default())
        .bind(ContactStatus::New)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn insert_booking(
        pool: &SqlitePool,
        create: CreateBookingRequest,
    ) -> Result<BookingInquiry, ApiError> {
        // package_title is denormalized display data, not required input;
        // it defaults to an empty string when the form omits it.
        let required = [
            &create.package_id,
            &create.customer_name,
            &create.email,
            &create.phone,
            &create.preferred_date,
            &create.number_of_people,
        ];
        if !required.into_iter().all(present) {
            return Err(ApiError::missing_fields());
        }

        let row = sqlx::query_as::<_, BookingInquiry>(
            "INSERT INTO booking_inquiries \
             (id, package_id, package_title, customer_name, email, phone, preferred_date, \
              number_of_people, special_requests, status, submitted_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(create.package_id.unwrap_or_default())
        .bind(create.package_title.unwrap_or_default())
        .bind(create.customer_name.unwrap_or_default())
        .bind(create.email.unwrap_or_default())
        .bind(create.phone.unwrap_or_default())
        .bind(create.preferred_date.unwrap_or_default())
        .bind(create.number_of_people.unwrap_or_default())
        .bind(create.special_requests)
        .bind(BookingStatus::Pending)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn set_contact_status(
        pool: &SqlitePool,
        id: Uuid,
        status: ContactStatus,
    ) -> Result<Option<ContactSubmission>, ApiError> {
        let row = sqlx::query_as::<_, ContactSubmission>(
            "UPDATE contact_submissions SET status = ? WHERE id = ? RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn set_booking_status(
        pool: &SqlitePool,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<BookingInquiry>, ApiError> {
        let row = sqlx::query_as::<_, BookingInquiry>(
            "UPDATE booking_inquiries SET status = ? WHERE id = ? RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_rejects_missing_and_empty() {
        assert!(!present(&None));
        assert!(!present(&Some(String::new())));
        assert!(present(&Some("x".to_string())));
    }

    #[test]
    fn package_validation_lists_category_as_required() {
        let create = CreatePackageRequest {
            title: Some("Gorilla Trek".into()),
            description: Some("desc".into()),
            price: Some("$1500".into()),
            duration: Some("3 Days".into()),
            category: None,
            details: Some("details".into()),
            image: None,
        };
        assert!(TravelPackage::validate(&create).is_err());
    }

    #[test]
    fn package_validation_allows_missing_image() {
        let create = CreatePackageRequest {
            title: Some("Gorilla Trek".into()),
            description: Some("desc".into()),
            price: Some("$1500".into()),
            duration: Some("3 Days".into()),
            category: Some("wildlife".into()),
            details: Some("details".into()),
            image: None,
        };
        assert!(TravelPackage::validate(&create).is_ok());
    }
}
