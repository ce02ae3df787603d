use super::handlers::{admin, analysis, comments, gbairais, health};
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

const ALLOWED_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::DELETE];

pub fn build_router(state: AppState, allowed_origins: &str) -> Router {
    let cors = if allowed_origins == "*" {
        CorsLayer::new()
            .allow_methods(ALLOWED_METHODS)
            .allow_origin(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<HeaderValue>().ok())
            .collect();

        if origins.is_empty() {
            tracing::warn!("CORS config is invalid or empty, falling back to allow ANY.");
            CorsLayer::new()
                .allow_methods(ALLOWED_METHODS)
                .allow_origin(Any)
                .allow_headers(Any)
        } else {
            tracing::info!("CORS enabled for origins: {:?}", origins);
            CorsLayer::new()
                .allow_methods(ALLOWED_METHODS)
                .allow_origin(origins)
                .allow_headers(Any)
        }
    };

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/moderate-content", post(analysis::moderate_content))
        .route("/api/validate-content", post(analysis::validate_content))
        .route("/api/analyze-emotion", post(analysis::analyze_emotion))
        .route("/api/emotions", get(analysis::list_emotions))
        .route(
            "/api/gbairais",
            get(gbairais::list_gbairais).post(gbairais::create_gbairai),
        )
        .route("/api/gbairais/:id", get(gbairais::get_gbairai))
        .route(
            "/api/gbairais/:id/comments",
            get(comments::list_comments).post(comments::post_comment),
        )
        .route("/api/comments/:id/replies", get(comments::list_replies))
        .route("/api/comments/:id", delete(admin::delete_comment))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter::{ContentModerator, EmotionAnalysisService};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use domain::moderation::FixedSelector;
    use domain::{
        Blacklist, ContentValidator, IvoirianDictionary, LocalModerator, RejectionPolicy,
        RemoteFailurePolicy,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use storage::Db;
    use tower::ServiceExt;

    const ADMIN_TOKEN: &str = "test-admin";

    async fn app() -> Router {
        let db = Db::new("sqlite::memory:").await.unwrap();
        let local = LocalModerator::new(
            Blacklist::new(),
            RejectionPolicy::with_selector(Arc::new(FixedSelector(0))),
        );
        let state = AppState {
            db,
            moderator: Arc::new(ContentModerator::new(local, None, RemoteFailurePolicy::FailOpen)),
            analyzer: Arc::new(EmotionAnalysisService::new(IvoirianDictionary::new(), None)),
            validator: ContentValidator::new(),
            admin_token: ADMIN_TOKEN.to_string(),
        };
        build_router(state, "*")
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn post_comment(app: &Router, gbairai: i64, author: &str, content: &str, parent: Option<i64>) -> Value {
        let (status, body) = send(
            app,
            Method::POST,
            &format!("/api/gbairais/{}/comments", gbairai),
            Some(json!({
                "authorId": 1,
                "authorName": author,
                "content": content,
                "parentCommentId": parent,
            })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
    }

    #[tokio::test]
    async fn moderation_endpoint_blocks_banned_words() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/moderate-content",
            Some(json!({ "content": "je vais te tuer" })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["approved"], false);
        assert!(body["foundWords"].as_array().unwrap().contains(&json!("tuer")));
        assert!(body["reason"].is_string());
    }

    #[tokio::test]
    async fn moderation_endpoint_fails_open_without_provider() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/moderate-content",
            Some(json!({ "content": "Salut, comment ça va aujourd'hui ?" })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "approved": true }));
    }

    #[tokio::test]
    async fn missing_content_is_a_bad_request() {
        let app = app().await;
        for uri in ["/api/moderate-content", "/api/validate-content"] {
            let (status, body) = send(&app, Method::POST, uri, Some(json!({})), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Contenu requis");
        }
        let (status, body) =
            send(&app, Method::POST, "/api/analyze-emotion", Some(json!({ "text": "" })), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Texte requis");
    }

    #[tokio::test]
    async fn validation_endpoint_reports_issues() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/validate-content",
            Some(json!({ "content": "abc" })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isValid"], false);
        assert!(body["issues"].as_array().unwrap().contains(&json!("Contenu trop court")));
        assert!(body["suggestedChanges"].is_array());
    }

    #[tokio::test]
    async fn emotion_endpoint_uses_dictionary_without_provider() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/analyze-emotion",
            Some(json!({ "text": "même pas fatigue, tout va bien" })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["emotion"], "enjaillé");
        assert!(body["localTerms"].as_array().unwrap().contains(&json!("même pas fatigue")));
    }

    async fn create_gbairai(app: &Router, content: &str) -> i64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/gbairais",
            Some(json!({ "content": content, "emotion": "enjaillé" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn non_string_field_is_treated_as_missing() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/moderate-content",
            Some(json!({ "content": 3 })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Contenu requis");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/analyze-emotion",
            Some(json!({ "text": ["a"] })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Texte requis");
    }

    #[tokio::test]
    async fn emotion_catalog_lists_dictionary() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api/emotions", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["emotions"].as_array().unwrap().len(), 7);
        assert_eq!(body["emotions"][0]["name"], "enjaillé");
        assert!(body["nouchiTerms"].as_array().unwrap().contains(&json!("même pas fatigue")));
    }

    #[tokio::test]
    async fn gbairai_is_published_and_listed() {
        let app = app().await;
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/gbairais",
            Some(json!({ "content": "même pas fatigue, on est ensemble", "authorId": 4 })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", created);
        // 没给情绪时由字典推断
        assert_eq!(created["emotion"], "enjaillé");
        assert_eq!(created["isAnonymous"], true);
        assert_eq!(created["status"], "active");

        let id = created["id"].as_i64().unwrap();
        let (status, fetched) =
            send(&app, Method::GET, &format!("/api/gbairais/{}", id), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["content"], "même pas fatigue, on est ensemble");

        let (status, feed) =
            send(&app, Method::GET, "/api/gbairais?emotion=enjaill%C3%A9", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(feed.as_array().unwrap().len(), 1);

        let (_, other) = send(&app, Method::GET, "/api/gbairais?emotion=goumin", None, None).await;
        assert!(other.as_array().unwrap().is_empty());

        let (status, _) = send(&app, Method::GET, "/api/gbairais/999", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn gbairai_with_banned_word_is_moderated_before_validation() {
        let app = app().await;
        // 既太短又含违禁词：先返回审核结果
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/gbairais",
            Some(json!({ "content": "tuer", "emotion": "nerveux" })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Contenu modéré");
        assert_eq!(body["foundWords"], json!(["tuer"]));
        assert!(body["message"].is_string());
        assert!(body["suggestion"].is_string());

        let (_, feed) = send(&app, Method::GET, "/api/gbairais", None, None).await;
        assert!(feed.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_gbairai_reports_issues_and_suggestions() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/gbairais",
            Some(json!({ "content": "non non non", "emotion": "nerveux" })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Contenu invalide");
        assert!(body["issues"]
            .as_array()
            .unwrap()
            .contains(&json!("Répétition excessive de caractères")));
        assert!(!body["suggestions"].as_array().unwrap().is_empty());

        let (_, feed) = send(&app, Method::GET, "/api/gbairais", None, None).await;
        assert!(feed.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn replies_come_back_threaded() {
        let app = app().await;
        let gbairai = create_gbairai(&app, "Bonne arrivée à Abidjan").await;
        let top = post_comment(&app, gbairai, "Alice", "Bonne arrivée à toi", None).await;
        let top_id = top["id"].as_i64().unwrap();

        let r1 = post_comment(&app, gbairai, "Bob", "@Alice salut", Some(top_id)).await;
        let r2 = post_comment(&app, gbairai, "Dave", "@Zoe ok", Some(top_id)).await;
        let r1_id = r1["id"].as_i64().unwrap();
        // 回复一条回复：新回复挂到顶层评论下
        let r3 = post_comment(&app, gbairai, "Carol", "@Bob suite", Some(r1_id)).await;
        assert_eq!(r3["parentCommentId"], top_id);
        assert_eq!(r3["replyToId"], r1_id);

        let (status, top_level) = send(
            &app,
            Method::GET,
            &format!("/api/gbairais/{}/comments", gbairai),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(top_level.as_array().unwrap().len(), 1);

        let (status, replies) = send(
            &app,
            Method::GET,
            &format!("/api/comments/{}/replies", top_id),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let order: Vec<i64> = replies
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(order, vec![r1_id, r3["id"].as_i64().unwrap(), r2["id"].as_i64().unwrap()]);
        assert_eq!(replies[0]["isDirectReply"], true);
        assert_eq!(replies[1]["isDirectReply"], false);
    }

    #[tokio::test]
    async fn moderated_comment_is_refused() {
        let app = app().await;
        let gbairai = create_gbairai(&app, "Bonne arrivée à Abidjan").await;
        let uri = format!("/api/gbairais/{}/comments", gbairai);
        let (status, body) = send(
            &app,
            Method::POST,
            &uri,
            Some(json!({ "authorId": 2, "authorName": "Bob", "content": "espèce de connard" })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Contenu modéré");
        assert!(body["foundWords"].as_array().unwrap().contains(&json!("connard")));

        let (_, comments) = send(&app, Method::GET, &uri, None, None).await;
        assert!(comments.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn comment_on_unknown_gbairai_is_refused() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/gbairais/42/comments",
            Some(json!({ "authorId": 2, "authorName": "Bob", "content": "Bien dit" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Gbairai non trouvé");
    }

    #[tokio::test]
    async fn reply_to_unknown_or_foreign_parent_is_refused() {
        let app = app().await;
        let first = create_gbairai(&app, "Bonne arrivée à Abidjan").await;
        let second = create_gbairai(&app, "On se voit à Yopougon").await;

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/gbairais/{}/comments", first),
            Some(json!({ "authorId": 2, "authorName": "Bob", "content": "Bien dit", "parentCommentId": 999 })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let top = post_comment(&app, first, "Alice", "Bonne arrivée", None).await;
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/gbairais/{}/comments", second),
            Some(json!({ "authorId": 2, "authorName": "Bob", "content": "Bien dit", "parentCommentId": top["id"] })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleting_requires_admin_token() {
        let app = app().await;
        let gbairai = create_gbairai(&app, "Bonne arrivée à Abidjan").await;
        let top = post_comment(&app, gbairai, "Alice", "Bonne arrivée", None).await;
        let uri = format!("/api/comments/{}", top["id"]);

        let (status, _) = send(&app, Method::DELETE, &uri, None, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = send(&app, Method::DELETE, &uri, None, Some("wrong")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, Method::DELETE, &uri, None, Some(ADMIN_TOKEN)).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, &uri, None, Some(ADMIN_TOKEN)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
