mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{BACKENDS, accented_recipes, get_json, ids, sample_recipes, search_uri, setup_app};
use recipe_api::routes::ROOT_MESSAGE;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_root_message() {
    let app = setup_app(BACKENDS[0], sample_recipes()).await;
    let (status, body) = get_json(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": ROOT_MESSAGE }));
}

#[tokio::test]
async fn test_list_defaults_and_envelope() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;
        let (status, body) = get_json(&app, "/api/recipes").await;

        assert_eq!(status, StatusCode::OK, "{backend:?}");
        assert_eq!(body["page"], 1);
        assert_eq!(body["limit"], 10);
        assert_eq!(body["total"], 5);
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
    }
}

#[tokio::test]
async fn test_list_orders_by_rating_with_unrated_last() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;
        let (_, body) = get_json(&app, "/api/recipes").await;

        // 5.0, 4.5, 3.0, then the two unrated recipes by id
        assert_eq!(ids(&body), vec![5, 1, 3, 2, 4], "{backend:?}");
        assert!(body["data"][3]["rating"].is_null());
        assert!(body["data"][4]["rating"].is_null());
    }
}

#[tokio::test]
async fn test_list_page_and_limit() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;
        let (status, body) = get_json(&app, "/api/recipes?page=2&limit=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], 2);
        assert_eq!(body["limit"], 2);
        assert_eq!(body["total"], 5);
        assert_eq!(ids(&body), vec![3, 2], "{backend:?}");

        let (status, body) = get_json(&app, "/api/recipes?page=4&limit=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 5);
        assert!(ids(&body).is_empty());
    }
}

#[tokio::test]
async fn test_out_of_range_pagination_is_unprocessable() {
    let app = setup_app(BACKENDS[0], sample_recipes()).await;

    for uri in [
        "/api/recipes?page=0",
        "/api/recipes?limit=0",
        "/api/recipes?limit=101",
        "/api/recipes?page=-1",
        "/api/recipes?page=abc",
        "/api/recipes?limit=1.5",
        "/api/recipes/search?limit=101",
        "/api/recipes/search?page=0&title=pie",
    ] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert!(!body["detail"].is_null(), "{uri}: {body}");
    }

    let (status, body) = get_json(&app, "/api/recipes?limit=100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 100);
}

#[tokio::test]
async fn test_get_recipe_by_id() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;
        let (status, body) = get_json(&app, "/api/recipes/1").await;

        assert_eq!(status, StatusCode::OK, "{backend:?}");
        assert_eq!(body["id"], 1);
        assert_eq!(body["title"], "Sweet Potato Pie");
        assert_eq!(body["cuisine"], "Southern Recipes");
        assert_eq!(body["rating"], 4.5);
        assert_eq!(body["total_time"], 115);
        assert_eq!(body["serves"], "8 servings");
        assert_eq!(
            body["nutrients"],
            json!({ "calories": "389 kcal", "fatContent": "21 g" })
        );

        let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "id",
                "title",
                "cuisine",
                "rating",
                "prep_time",
                "cook_time",
                "total_time",
                "description",
                "nutrients",
                "serves"
            ]
        );
    }
}

#[tokio::test]
async fn test_get_recipe_normalized_absent_values() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;
        let (status, body) = get_json(&app, "/api/recipes/4").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["rating"].is_null(), "{backend:?}: {body}");
        assert!(body["prep_time"].is_null());
        assert!(body["nutrients"].is_null());
        assert!(body["serves"].is_null());
        assert_eq!(body["cook_time"], 40);
    }
}

#[tokio::test]
async fn test_get_missing_recipe() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;
        let (status, body) = get_json(&app, "/api/recipes/999").await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{backend:?}");
        assert_eq!(body, json!({ "detail": "Recipe not found" }));
    }
}

#[tokio::test]
async fn test_get_recipe_with_non_integer_id() {
    let app = setup_app(BACKENDS[0], sample_recipes()).await;
    let (status, _) = get_json(&app, "/api/recipes/abc").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_search_without_filters_matches_list() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;
        let (_, listed) = get_json(&app, "/api/recipes").await;
        let (status, searched) = get_json(&app, "/api/recipes/search").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, searched, "{backend:?}");
    }
}

#[tokio::test]
async fn test_search_by_title_and_cuisine_is_case_insensitive() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;

        let (_, body) = get_json(&app, &search_uri(&[("title", "PIE")])).await;
        assert_eq!(ids(&body), vec![1], "{backend:?}");

        let (_, body) = get_json(&app, &search_uri(&[("title", "pasta")])).await;
        assert_eq!(ids(&body), vec![2], "{backend:?}");

        // "Italian" and "italian" both match, rated before unrated
        let (_, body) = get_json(&app, &search_uri(&[("cuisine", "ITALIAN")])).await;
        assert_eq!(ids(&body), vec![3, 2], "{backend:?}");
        assert_eq!(body["total"], 2);
    }
}

#[tokio::test]
async fn test_search_accented_text_is_case_insensitive() {
    for backend in BACKENDS {
        let app = setup_app(backend, accented_recipes()).await;

        for needle in ["crème", "Crème", "CRÈME", "brûlée", "BRÛLÉE"] {
            let (_, body) = get_json(&app, &search_uri(&[("title", needle)])).await;
            assert_eq!(ids(&body), vec![1], "{backend:?} title={needle}");
        }

        // Accents are significant; only case is folded
        let (_, body) = get_json(&app, &search_uri(&[("title", "creme")])).await;
        assert_eq!(ids(&body), vec![3], "{backend:?}");

        let (_, body) = get_json(&app, &search_uri(&[("cuisine", "FRANÇAISE")])).await;
        assert_eq!(ids(&body), vec![2, 1], "{backend:?}");

        let uri = search_uri(&[("title", "crê"), ("cuisine", "française")]);
        let (_, body) = get_json(&app, &uri).await;
        assert_eq!(ids(&body), vec![2], "{backend:?}");
    }
}

#[tokio::test]
async fn test_search_with_overflowing_bound() {
    let huge = "9".repeat(400);
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;

        let uri = search_uri(&[("calories", &format!("<={huge}"))]);
        let (status, body) = get_json(&app, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![5, 1, 2], "{backend:?}");

        let uri = search_uri(&[("total_time", &format!(">{huge}"))]);
        let (_, body) = get_json(&app, &uri).await;
        assert_eq!(body["total"], 0, "{backend:?}");
    }
}

#[tokio::test]
async fn test_search_text_wildcards_are_literal() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;

        let (_, body) = get_json(&app, &search_uri(&[("title", "%")])).await;
        assert_eq!(body["total"], 0, "{backend:?}");

        let (_, body) = get_json(&app, &search_uri(&[("title", "_ie")])).await;
        assert_eq!(body["total"], 0, "{backend:?}");
    }
}

#[tokio::test]
async fn test_search_by_calories() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;

        let (_, body) = get_json(&app, &search_uri(&[("calories", "<=400")])).await;
        assert_eq!(ids(&body), vec![5, 1], "{backend:?}");

        // "1,024 cal" is read as 1024
        let (_, body) = get_json(&app, &search_uri(&[("calories", "=1024")])).await;
        assert_eq!(ids(&body), vec![2], "{backend:?}");

        let (_, body) = get_json(&app, &search_uri(&[("calories", "389")])).await;
        assert_eq!(ids(&body), vec![1], "{backend:?}");

        // Recipes without parsable calories never match a calorie filter
        let (_, body) = get_json(&app, &search_uri(&[("calories", ">=0")])).await;
        assert_eq!(ids(&body), vec![5, 1, 2], "{backend:?}");
        assert_eq!(body["total"], 3);
    }
}

#[tokio::test]
async fn test_search_by_total_time_and_rating() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;

        let (_, body) = get_json(&app, &search_uri(&[("total_time", "<=30")])).await;
        assert_eq!(ids(&body), vec![3, 2], "{backend:?}");

        let (_, body) = get_json(&app, &search_uri(&[("total_time", ">115")])).await;
        assert!(ids(&body).is_empty());

        let (_, body) = get_json(&app, &search_uri(&[("rating", ">=4.5")])).await;
        assert_eq!(ids(&body), vec![5, 1], "{backend:?}");

        let (_, body) = get_json(&app, &search_uri(&[("rating", "<4")])).await;
        assert_eq!(ids(&body), vec![3], "{backend:?}");

        let (_, body) = get_json(&app, &search_uri(&[("rating", "4.5")])).await;
        assert_eq!(ids(&body), vec![1], "{backend:?}");
    }
}

#[tokio::test]
async fn test_search_filters_are_combined() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;
        let uri = search_uri(&[
            ("cuisine", "southern"),
            ("calories", "<300"),
            ("rating", ">=4"),
        ]);
        let (_, body) = get_json(&app, &uri).await;

        assert_eq!(ids(&body), vec![5], "{backend:?}");
        assert_eq!(body["total"], 1);
    }
}

#[tokio::test]
async fn test_search_ignores_malformed_filters() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;
        let uri = search_uri(&[
            ("calories", "abc"),
            ("rating", "<= 4"),
            ("total_time", "4."),
            ("title", ""),
        ]);
        let (status, body) = get_json(&app, &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 5, "{backend:?}");

        // A malformed filter does not disable the well-formed ones
        let uri = search_uri(&[("calories", "lots"), ("title", "soup")]);
        let (_, body) = get_json(&app, &uri).await;
        assert_eq!(ids(&body), vec![4], "{backend:?}");
    }
}

#[tokio::test]
async fn test_search_total_counts_all_matches() {
    for backend in BACKENDS {
        let app = setup_app(backend, sample_recipes()).await;
        let mut uri = search_uri(&[("total_time", "<=65")]);
        uri.push_str("&limit=1&page=2");
        let (_, body) = get_json(&app, &uri).await;

        // 20, 30, 50 and 65 minutes match; page 2 of size 1 is the 3.0 recipe
        assert_eq!(body["total"], 4, "{backend:?}");
        assert_eq!(body["page"], 2);
        assert_eq!(body["limit"], 1);
        assert_eq!(ids(&body), vec![3], "{backend:?}");
    }
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = setup_app(BACKENDS[1], sample_recipes()).await;
    let request = Request::builder()
        .method("GET")
        .uri("/api/recipes")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_docs_are_served() {
    let app = setup_app(BACKENDS[1], sample_recipes()).await;
    let request = Request::builder()
        .method("GET")
        .uri("/docs")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
