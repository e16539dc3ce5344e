use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Identity ---

/// AdminUser
///
/// A CMS console account from the `admin_users` table. The password hash is
/// carried for verification during login but never serialized into responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2id PHC string. Write-only: excluded from all JSON output.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// 'admin' or 'editor'.
    pub role: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// LoginRequest
///
/// Input payload for POST /api/auth/login.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// RegisterRequest
///
/// Input payload for POST /api/auth/register. The role defaults to 'editor'
/// when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// AuthResponse
///
/// Output of both login and register: the bearer token plus the account it
/// is scoped to.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuthResponse {
    pub token: String,
    pub user: AdminUser,
}

// --- Catalog entities ---

/// TravelPackage
///
/// A bookable tour from the `travel_packages` table. `category` holds a
/// Category slug by convention; there is no enforced foreign key.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TravelPackage {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Display price, stored as entered (e.g. "$1,500").
    pub price: String,
    pub duration: String,
    pub image: String,
    pub category: String,
    pub details: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreatePackageRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub duration: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdatePackageRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub duration: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub details: Option<String>,
}

/// BlogArticle
///
/// A published article. `date` is the editorial publication date set by the
/// server at creation and used for recency ordering.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BlogArticle {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    #[ts(type = "string")]
    pub date: DateTime<Utc>,
    pub author: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateArticleRequest {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
}

/// GalleryImage
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GalleryImage {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub description: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateGalleryImageRequest {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateGalleryImageRequest {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Faq
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateFaqRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateFaqRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
}

/// Partner
///
/// An accommodation or certification partner shown on the site. The `type`
/// column is a reserved word in Rust, hence the rename.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Partner {
    pub id: Uuid,
    pub name: String,
    pub logo: String,
    /// 'accommodation' or 'certification'.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub partner_type: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreatePartnerRequest {
    pub name: Option<String>,
    pub logo: Option<String>,
    #[serde(rename = "type")]
    pub partner_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdatePartnerRequest {
    pub name: Option<String>,
    pub logo: Option<String>,
    #[serde(rename = "type")]
    pub partner_type: Option<String>,
}

/// Category
///
/// Safari category. `slug` is what TravelPackage rows reference; deleting a
/// category does not touch packages carrying its slug.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// Creditation
///
/// A trust badge (license, certification). `icon` stores an icon name string
/// that the presentation layer maps to a component.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Creditation {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateCreditationRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateCreditationRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
}

// --- Singleton settings ---

/// CmsSettings
///
/// Site-wide settings. Intended to have at most one row; the repository's
/// upsert keeps it that way rather than a schema constraint.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CmsSettings {
    pub id: Uuid,
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    /// Number the booking/contact flow hands off to for WhatsApp messaging.
    pub whatsapp_number: String,
    pub about_content: String,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// UpdateSettingsRequest
///
/// Partial payload for PUT /api/settings. Provided fields merge into the
/// existing row; when no row exists one is created with defaults filled in.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateSettingsRequest {
    pub company_name: Option<String>,
    pub company_email: Option<String>,
    pub company_phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub about_content: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
}

// --- Inbox entities (contact + bookings) ---

/// ContactStatus
///
/// Workflow state of a contact submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, sqlx::Type, Default,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[ts(export)]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Responded,
}

/// ContactSubmission
///
/// A message sent through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: ContactStatus,
    #[ts(type = "string")]
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// BookingStatus
///
/// Workflow state of a booking inquiry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, sqlx::Type, Default,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[ts(export)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

/// BookingInquiry
///
/// A booking request submitted against a travel package. `package_id` is a
/// soft reference; inquiries outlive package deletion, so the title is
/// denormalized alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookingInquiry {
    pub id: Uuid,
    pub package_id: String,
    pub package_title: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_date: String,
    pub number_of_people: String,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    #[ts(type = "string")]
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateBookingRequest {
    pub package_id: Option<String>,
    pub package_title: Option<String>,
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub preferred_date: Option<String>,
    pub number_of_people: Option<String>,
    pub special_requests: Option<String>,
}

/// UpdateStatusRequest
///
/// Body of the PATCH …/status endpoints. The raw string is validated against
/// the relevant enum in the handler so an unknown value yields 400 rather
/// than a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// DeleteResponse
///
/// Body returned by every DELETE endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeleteResponse {
    pub message: String,
}
