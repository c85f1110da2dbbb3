//! `/api/profile`: public reads, token-guarded writes.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::profiles::{Education, Experience, ProfileFields, Social};
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::middleware::JwtExtract;
use crate::services::{profiles as profiles_service, users as users_service};
use crate::state::app_state::AppState;
use crate::utils::validation::{non_blank, Checks};

/// `skills` arrives as a comma-separated string; a JSON array is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    Csv(String),
    List(Vec<String>),
}

impl SkillsInput {
    fn into_list(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            SkillsInput::Csv(s) => s.split(',').map(str::to_string).collect(),
            SkillsInput::List(items) => items,
        };
        raw.iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<SkillsInput>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl ProfileRequest {
    fn validate(self) -> Result<ProfileFields, AppError> {
        let skills = self
            .skills
            .map(SkillsInput::into_list)
            .unwrap_or_default();

        Checks::new()
            .not_empty("status", self.status.as_deref(), "Status is required")
            .present(
                "skills",
                (!skills.is_empty()).then_some(""),
                "Skills is required",
            )
            .finish()?;

        let social = Social {
            youtube: non_blank(self.youtube),
            twitter: non_blank(self.twitter),
            facebook: non_blank(self.facebook),
            linkedin: non_blank(self.linkedin),
            instagram: non_blank(self.instagram),
        };

        Ok(ProfileFields {
            company: non_blank(self.company),
            website: non_blank(self.website),
            location: non_blank(self.location),
            status: self.status.unwrap_or_default().trim().to_string(),
            skills,
            bio: non_blank(self.bio),
            githubusername: non_blank(self.githubusername),
            social: (!social.is_empty()).then_some(social),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl ExperienceRequest {
    fn validate(self) -> Result<Experience, AppError> {
        Checks::new()
            .not_empty("title", self.title.as_deref(), "Title is required")
            .not_empty("company", self.company.as_deref(), "Company is required")
            .not_empty("from", self.from.as_deref(), "From date is required")
            .finish()?;

        Ok(Experience {
            id: ulid::Ulid::new().to_string(),
            title: self.title.unwrap_or_default().trim().to_string(),
            company: self.company.unwrap_or_default().trim().to_string(),
            location: non_blank(self.location),
            from: self.from.unwrap_or_default().trim().to_string(),
            to: non_blank(self.to),
            current: self.current.unwrap_or(false),
            description: non_blank(self.description),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct EducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub fieldofstudy: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl EducationRequest {
    fn validate(self) -> Result<Education, AppError> {
        Checks::new()
            .not_empty("school", self.school.as_deref(), "School is required")
            .not_empty("degree", self.degree.as_deref(), "Degree is required")
            .not_empty(
                "fieldofstudy",
                self.fieldofstudy.as_deref(),
                "Field of study is required",
            )
            .not_empty("from", self.from.as_deref(), "From date is required")
            .finish()?;

        Ok(Education {
            id: ulid::Ulid::new().to_string(),
            school: self.school.unwrap_or_default().trim().to_string(),
            degree: self.degree.unwrap_or_default().trim().to_string(),
            fieldofstudy: self.fieldofstudy.unwrap_or_default().trim().to_string(),
            from: self.from.unwrap_or_default().trim().to_string(),
            to: non_blank(self.to),
            current: self.current.unwrap_or(false),
            description: non_blank(self.description),
        })
    }
}

async fn my_profile(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profile = profiles_service::my_profile(&app_state, &user.id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

async fn save_profile(
    user: CurrentUser,
    body: ValidatedJson<ProfileRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let fields = body.into_inner().validate()?;
    let profile = profiles_service::upsert_profile(&app_state, &user.id, fields).await?;
    Ok(HttpResponse::Ok().json(profile))
}

async fn all_profiles(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let profiles = profiles_service::all_profiles(&app_state).await?;
    Ok(HttpResponse::Ok().json(profiles))
}

async fn profile_by_user(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let profile = profiles_service::profile_of(&app_state, &user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Removes the caller's posts, profile and identity.
async fn delete_account(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    users_service::delete_account(&app_state, &user.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "msg": "User deleted" })))
}

async fn add_experience(
    user: CurrentUser,
    body: ValidatedJson<ExperienceRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let entry = body.into_inner().validate()?;
    let profile = profiles_service::add_experience(&app_state, &user.id, entry).await?;
    Ok(HttpResponse::Ok().json(profile))
}

async fn remove_experience(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let entry_id = path.into_inner();
    let profile = profiles_service::remove_experience(&app_state, &user.id, &entry_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

async fn add_education(
    user: CurrentUser,
    body: ValidatedJson<EducationRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let entry = body.into_inner().validate()?;
    let profile = profiles_service::add_education(&app_state, &user.id, entry).await?;
    Ok(HttpResponse::Ok().json(profile))
}

async fn remove_education(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let entry_id = path.into_inner();
    let profile = profiles_service::remove_education(&app_state, &user.id, &entry_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

async fn github_repos(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    let repos = app_state.github.latest_repos(&username).await?;
    Ok(HttpResponse::Ok().json(repos))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(all_profiles))
            .route(web::post().to(save_profile).wrap(JwtExtract))
            .route(web::delete().to(delete_account).wrap(JwtExtract)),
    )
    .service(
        web::resource("/me")
            .wrap(JwtExtract)
            .route(web::get().to(my_profile)),
    )
    .service(web::resource("/user/{user_id}").route(web::get().to(profile_by_user)))
    .service(
        web::resource("/experience")
            .wrap(JwtExtract)
            .route(web::put().to(add_experience)),
    )
    .service(
        web::resource("/experience/{exp_id}")
            .wrap(JwtExtract)
            .route(web::delete().to(remove_experience)),
    )
    .service(
        web::resource("/education")
            .wrap(JwtExtract)
            .route(web::put().to(add_education)),
    )
    .service(
        web::resource("/education/{edu_id}")
            .wrap(JwtExtract)
            .route(web::delete().to(remove_education)),
    )
    .service(web::resource("/github/{username}").route(web::get().to(github_repos)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn profile_request(status: Option<&str>, skills: Option<SkillsInput>) -> ProfileRequest {
        ProfileRequest {
            company: Some("  ".into()),
            website: None,
            location: Some("Berlin".into()),
            bio: None,
            status: status.map(str::to_string),
            githubusername: None,
            skills,
            youtube: None,
            twitter: Some("https://twitter.com/jane".into()),
            facebook: None,
            linkedin: None,
            instagram: None,
        }
    }

    #[test]
    fn test_skills_are_split_and_trimmed() {
        let fields = profile_request(
            Some("Developer"),
            Some(SkillsInput::Csv(" rust, go ,,sql ".into())),
        )
        .validate()
        .unwrap();

        assert_eq!(fields.skills, ["rust", "go", "sql"]);
        assert_eq!(fields.company, None);
        assert_eq!(fields.location.as_deref(), Some("Berlin"));
        let social = fields.social.unwrap();
        assert_eq!(social.twitter.as_deref(), Some("https://twitter.com/jane"));
        assert!(social.youtube.is_none());
    }

    #[test]
    fn test_status_and_skills_required() {
        let err = profile_request(None, Some(SkillsInput::Csv(" , ".into())))
            .validate()
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        match err {
            AppError::Validation { errors } => {
                let msgs: Vec<_> = errors.iter().map(|e| e.msg.as_str()).collect();
                assert_eq!(msgs, ["Status is required", "Skills is required"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_skills_list_form_accepted() {
        let fields = profile_request(
            Some("Student"),
            Some(SkillsInput::List(vec!["html".into(), " css ".into()])),
        )
        .validate()
        .unwrap();
        assert_eq!(fields.skills, ["html", "css"]);
        assert!(fields.social.is_some());
    }

    #[test]
    fn test_experience_requires_title_company_from() {
        let err = ExperienceRequest {
            title: None,
            company: Some("Acme".into()),
            location: None,
            from: None,
            to: None,
            current: None,
            description: None,
        }
        .validate()
        .unwrap_err();

        match err {
            AppError::Validation { errors } => {
                let params: Vec<_> = errors.iter().filter_map(|e| e.param.as_deref()).collect();
                assert_eq!(params, ["title", "from"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_education_gets_fresh_id() {
        let make = || EducationRequest {
            school: Some("MIT".into()),
            degree: Some("BSc".into()),
            fieldofstudy: Some("CS".into()),
            from: Some("2010-09-01".into()),
            to: None,
            current: Some(true),
            description: None,
        };
        let a = make().validate().unwrap();
        let b = make().validate().unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.current);
    }
}
