//! Wire DTOs for the job-portal backend and the application payload.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON (`_id`, `iOpen`, `company_id`) so
//! host pages can hand deserialized records straight to the drawer. The
//! payload type is transport-neutral; `api` decides how it goes on the wire.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// A job posting as returned by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Backend document identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Posting title shown in the drawer header.
    #[serde(default)]
    pub title: String,
    /// Whether the posting still accepts applications.
    ///
    /// The backend spells this `iOpen`; `isOpen` is accepted too.
    #[serde(rename = "iOpen", alias = "isOpen", default)]
    pub is_open: bool,
    /// Owning company, either populated or as a bare reference id.
    #[serde(rename = "company_id", default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyRef>,
}

impl Job {
    /// Company display name, or an empty string when the company is not populated.
    pub fn company_name(&self) -> &str {
        match &self.company {
            Some(CompanyRef::Populated(company)) => &company.name,
            Some(CompanyRef::Id(_)) | None => "",
        }
    }
}

/// Company reference on a job: the backend populates it on detail routes only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompanyRef {
    Populated(Company),
    Id(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// The signed-in user envelope; identity lives under `data`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub data: Option<UserData>,
}

impl User {
    /// Backend user id, empty when the envelope carries no data.
    pub fn id(&self) -> &str {
        self.data.as_ref().map_or("", |d| d.id.as_str())
    }

    /// Display name used as the applicant name.
    pub fn display_name(&self) -> &str {
        self.data.as_ref().map_or("", |d| d.username.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
}

/// Highest completed education level offered by the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Education {
    Intermediate,
    Graduate,
    #[serde(rename = "Post Graduate")]
    PostGraduate,
}

impl Education {
    /// Options in display order.
    pub const ALL: [Self; 3] = [Self::Intermediate, Self::Graduate, Self::PostGraduate];

    /// Value submitted to the backend and shown as the radio label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intermediate => "Intermediate",
            Self::Graduate => "Graduate",
            Self::PostGraduate => "Post Graduate",
        }
    }

    /// DOM id linking the radio input to its label.
    pub fn input_id(self) -> &'static str {
        match self {
            Self::Intermediate => "intermediate",
            Self::Graduate => "graduate",
            Self::PostGraduate => "post-graduate",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == raw)
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A picked resume, read fully into memory so it can live in reactive state.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    /// MIME type reported by the browser; may be empty.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Everything sent to `createApplication`, assembled at submit time.
#[derive(Clone, Debug, PartialEq)]
pub struct ApplicationPayload {
    /// Applicant display name.
    pub name: String,
    /// Years of experience; `None` when the field was left blank or unparsable.
    pub experience: Option<f64>,
    /// Comma-separated skills, sent as typed.
    pub skills: String,
    pub education: Option<Education>,
    pub resume: Option<ResumeFile>,
    pub job_id: String,
    pub user_id: String,
}
