//! OpenAPI documentation for the HTTP API.
//!
//! [`ApiDoc`] collects every annotated handler. It is served as JSON at `/api/openapi.json` and
//! rendered with Scalar at `/api/docs`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api;
use crate::types::AccountStatus;

/// Bearer JWT issued by `/api/users/login` or the Google callback.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.security_schemes.insert(
            "BearerAuth".to_string(),
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Access token from `POST /api/users/login`. Send it in the `Authorization` header:\n\n\
                        ```\nAuthorization: Bearer YOUR_TOKEN\n```",
                    ))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Brewchemy API",
        description = "Homebrewing recipes and ingredient inventory.\n\n\
        Inventory lists merge the official catalog with your own items. Editing a catalog item \
        creates a personal copy linked through `officialId`; the catalog itself is read-only."
    ),
    modifiers(&SecurityAddon),
    paths(
        api::handlers::health::health,
        api::handlers::users::register,
        api::handlers::users::login,
        api::handlers::users::confirm,
        api::handlers::users::change_password,
        api::handlers::users::send_password_reset_email,
        api::handlers::users::google_login,
        api::handlers::users::google_callback,
        api::handlers::users::get_me,
        api::handlers::users::update_user,
        api::handlers::users::delete_user,
        api::handlers::equipments::list_equipments,
        api::handlers::equipments::search_equipments,
        api::handlers::equipments::get_equipment,
        api::handlers::equipments::create_equipment,
        api::handlers::equipments::update_equipment,
        api::handlers::equipments::delete_equipment,
        api::handlers::fermentables::list_fermentables,
        api::handlers::fermentables::search_fermentables,
        api::handlers::fermentables::get_fermentable,
        api::handlers::fermentables::create_fermentable,
        api::handlers::fermentables::update_fermentable,
        api::handlers::fermentables::delete_fermentable,
        api::handlers::hops::list_hops,
        api::handlers::hops::search_hops,
        api::handlers::hops::get_hop,
        api::handlers::hops::create_hop,
        api::handlers::hops::update_hop,
        api::handlers::hops::delete_hop,
        api::handlers::miscs::list_misc,
        api::handlers::miscs::search_misc,
        api::handlers::miscs::get_misc,
        api::handlers::miscs::create_misc,
        api::handlers::miscs::update_misc,
        api::handlers::miscs::delete_misc,
        api::handlers::yeasts::list_yeasts,
        api::handlers::yeasts::search_yeasts,
        api::handlers::yeasts::get_yeast,
        api::handlers::yeasts::create_yeast,
        api::handlers::yeasts::update_yeast,
        api::handlers::yeasts::delete_yeast,
        api::handlers::recipes::list_recipes,
        api::handlers::recipes::search_recipes,
        api::handlers::recipes::get_recipe,
        api::handlers::recipes::create_recipe,
        api::handlers::recipes::update_recipe,
        api::handlers::recipes::delete_recipe,
        api::handlers::recipes::copy_recipe,
        api::handlers::critique::critique_recipe,
    ),
    components(
        schemas(
            AccountStatus,
            api::handlers::health::HealthResponse,
            api::models::common::MessageResponse,
            api::models::users::LoginRequest,
            api::models::users::RegisterRequest,
            api::models::users::ChangePasswordRequest,
            api::models::users::PasswordResetEmailRequest,
            api::models::users::UserUpdate,
            api::models::users::TokenResponse,
            api::models::users::UserResponse,
            api::models::equipments::EquipmentCreate,
            api::models::equipments::EquipmentUpdate,
            api::models::equipments::EquipmentResponse,
            api::models::fermentables::FermentableCreate,
            api::models::fermentables::FermentableUpdate,
            api::models::fermentables::FermentableResponse,
            api::models::hops::HopCreate,
            api::models::hops::HopUpdate,
            api::models::hops::HopResponse,
            api::models::miscs::MiscCreate,
            api::models::miscs::MiscUpdate,
            api::models::miscs::MiscResponse,
            api::models::yeasts::YeastCreate,
            api::models::yeasts::YeastUpdate,
            api::models::yeasts::YeastResponse,
            api::models::recipes::RecipeCreate,
            api::models::recipes::RecipeUpdate,
            api::models::recipes::RecipeCopyRequest,
            api::models::recipes::RecipeEquipmentBody,
            api::models::recipes::RecipeFermentableBody,
            api::models::recipes::RecipeHopBody,
            api::models::recipes::RecipeMiscBody,
            api::models::recipes::RecipeYeastBody,
            api::models::recipes::RecipeResponse,
            api::models::recipes::RecipeEquipmentResponse,
            api::models::recipes::RecipeFermentableResponse,
            api::models::recipes::RecipeHopResponse,
            api::models::recipes::RecipeMiscResponse,
            api::models::recipes::RecipeYeastResponse,
            api::models::critique::CritiqueRequest,
            api::models::critique::CritiqueResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "users", description = "Accounts, sign-in and profile"),
        (name = "equipments", description = "Brewing systems"),
        (name = "fermentables", description = "Malts, sugars and other extract sources"),
        (name = "hops", description = "Hop varieties"),
        (name = "misc", description = "Finings, salts, spices and other additions"),
        (name = "yeasts", description = "Yeast strains"),
        (name = "recipes", description = "Recipes and their ingredient lists"),
        (name = "critique", description = "Recipe reviews from a chat model"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let json = ApiDoc::openapi().to_json().unwrap();
        for path in [
            "/health",
            "/api/users/login",
            "/api/users/google/callback",
            "/api/equipments/search",
            "/api/misc/{id}",
            "/api/recipes/{id}/copy",
            "/api/openAI",
        ] {
            assert!(json.contains(path), "missing {path}");
        }
        assert!(json.contains("BearerAuth"));
    }
}
