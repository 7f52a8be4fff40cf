mod fixtures;

use fixtures::PromoGraph;
use promograph::{RecommendOptions, recommend_pitch_targets, recommend_similar_artists};
use uuid::Uuid;

#[tokio::test]
async fn test_pitch_targets_ranked_with_name_tiebreak() {
    let graph = PromoGraph::create();

    let targets = recommend_pitch_targets(
        &graph.store,
        graph.velvet_static,
        &RecommendOptions::default(),
    )
    .await
    .unwrap();

    let names: Vec<&str> = targets.iter().map(|rec| rec.node.name.as_str()).collect();
    // Three identical same_scene scores resolve alphabetically, then the
    // weaker supports connection.
    assert_eq!(
        names,
        vec!["Amazing Radio", "BBC Radio 6", "NME Writer", "The Quietus"]
    );

    let scores: Vec<f64> = targets.iter().map(|rec| rec.score).collect();
    assert_eq!(scores, vec![0.85, 0.85, 0.85, 0.75]);

    assert!(targets.iter().all(|rec| rec.node.kind.is_contact()));
}

#[tokio::test]
async fn test_pitch_target_reasoning_and_common_connections() {
    let graph = PromoGraph::create();

    let targets = recommend_pitch_targets(
        &graph.store,
        graph.velvet_static,
        &RecommendOptions::default(),
    )
    .await
    .unwrap();

    let amazing = &targets[0];
    assert_eq!(amazing.common_connections, 1); // Neon Harbor
    assert_eq!(
        amazing.reasoning,
        "Direct same_scene connection; 1 connection pathway"
    );

    let bbc = &targets[1];
    assert_eq!(bbc.common_connections, 2); // Neon Harbor and Glass Arcade
    assert_eq!(
        bbc.reasoning,
        "Direct same_scene connection; 2 common connections"
    );

    let quietus = &targets[3];
    assert_eq!(quietus.common_connections, 0);
    assert_eq!(
        quietus.reasoning,
        "Direct supports connection; 0 common connections"
    );
}

#[tokio::test]
async fn test_similar_artists_scores_and_distance_decay() {
    let graph = PromoGraph::create();

    let similar = recommend_similar_artists(
        &graph.store,
        graph.velvet_static,
        &RecommendOptions::default(),
    )
    .await
    .unwrap();

    let names: Vec<&str> = similar.iter().map(|rec| rec.node.name.as_str()).collect();
    assert_eq!(names, vec!["Neon Harbor", "Glass Arcade", "Mirror Motel"]);

    assert_eq!(similar[0].score, 1.0); // 0.4 + 0.5 + 0.18, capped
    assert_eq!(similar[1].score, 0.8);
    // Two hops out scores exactly half of its one-hop gateway.
    assert_eq!(similar[2].score, similar[1].score / 2.0);
    assert_eq!(
        similar[2].reasoning,
        "Connected at 2 degrees via collaborates; 1 connection pathway"
    );
}

#[tokio::test]
async fn test_parallel_edges_use_strongest_relation() {
    let graph = PromoGraph::create();

    let similar = recommend_similar_artists(
        &graph.store,
        graph.velvet_static,
        &RecommendOptions::default(),
    )
    .await
    .unwrap();

    // Velvet Static has both a collaborates and a supports edge to
    // Glass Arcade; the collaborates edge carries the higher bonus and
    // must drive the score.
    let glass = similar
        .iter()
        .find(|rec| rec.node.id == graph.glass_arcade)
        .unwrap();
    assert_eq!(glass.score, 0.8);
    assert!(glass.reasoning.starts_with("Direct collaborates"));
}

#[tokio::test]
async fn test_recommend_min_score_filter() {
    let graph = PromoGraph::create();

    let options = RecommendOptions {
        min_score: 0.5,
        ..RecommendOptions::default()
    };
    let similar = recommend_similar_artists(&graph.store, graph.velvet_static, &options)
        .await
        .unwrap();

    let names: Vec<&str> = similar.iter().map(|rec| rec.node.name.as_str()).collect();
    assert_eq!(names, vec!["Neon Harbor", "Glass Arcade"]); // Mirror Motel at 0.4 drops
}

#[tokio::test]
async fn test_recommend_min_score_clamped() {
    let graph = PromoGraph::create();

    let options = RecommendOptions {
        min_score: 5.0, // clamps to 1.0
        ..RecommendOptions::default()
    };
    let similar = recommend_similar_artists(&graph.store, graph.velvet_static, &options)
        .await
        .unwrap();

    let names: Vec<&str> = similar.iter().map(|rec| rec.node.name.as_str()).collect();
    assert_eq!(names, vec!["Neon Harbor"]); // only the capped 1.0 survives
}

#[tokio::test]
async fn test_recommend_limit_counts_after_filtering() {
    let graph = PromoGraph::create();

    let options = RecommendOptions {
        limit: 1,
        ..RecommendOptions::default()
    };
    let similar = recommend_similar_artists(&graph.store, graph.velvet_static, &options)
        .await
        .unwrap();

    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0].node.name, "Neon Harbor");
}

#[tokio::test]
async fn test_recommend_country_filter_is_case_insensitive() {
    let graph = PromoGraph::create();

    let options = RecommendOptions {
        country: Some("se".to_string()),
        ..RecommendOptions::default()
    };
    let similar = recommend_similar_artists(&graph.store, graph.velvet_static, &options)
        .await
        .unwrap();

    let names: Vec<&str> = similar.iter().map(|rec| rec.node.name.as_str()).collect();
    assert_eq!(names, vec!["Glass Arcade", "Mirror Motel"]);
}

#[tokio::test]
async fn test_recommend_genre_filter_is_case_insensitive() {
    let graph = PromoGraph::create();

    let options = RecommendOptions {
        genre: Some("Shoegaze".to_string()),
        ..RecommendOptions::default()
    };
    let similar = recommend_similar_artists(&graph.store, graph.velvet_static, &options)
        .await
        .unwrap();

    let names: Vec<&str> = similar.iter().map(|rec| rec.node.name.as_str()).collect();
    assert_eq!(names, vec!["Neon Harbor"]);
}

#[tokio::test]
async fn test_recommend_depth_one_skips_indirect_candidates() {
    let graph = PromoGraph::create();

    let options = RecommendOptions {
        max_depth: 1,
        ..RecommendOptions::default()
    };
    let similar = recommend_similar_artists(&graph.store, graph.velvet_static, &options)
        .await
        .unwrap();

    let names: Vec<&str> = similar.iter().map(|rec| rec.node.name.as_str()).collect();
    assert_eq!(names, vec!["Neon Harbor", "Glass Arcade"]); // no Mirror Motel
}

#[tokio::test]
async fn test_recommend_unknown_subject_is_empty() {
    let graph = PromoGraph::create();

    let targets = recommend_pitch_targets(&graph.store, Uuid::new_v4(), &RecommendOptions::default())
        .await
        .unwrap();

    assert!(targets.is_empty());
}

#[tokio::test]
async fn test_recommend_zero_timeout_keeps_partial_set() {
    let graph = PromoGraph::create();

    let options = RecommendOptions {
        timeout_ms: 0,
        ..RecommendOptions::default()
    };
    let targets = recommend_pitch_targets(&graph.store, graph.velvet_static, &options)
        .await
        .unwrap();

    // Expiry before the first expansion leaves nothing, but it is a valid
    // empty result rather than an error.
    assert!(targets.is_empty());
}

#[tokio::test]
async fn test_recommendations_are_deterministic() {
    let graph = PromoGraph::create();

    let first = recommend_pitch_targets(
        &graph.store,
        graph.velvet_static,
        &RecommendOptions::default(),
    )
    .await
    .unwrap();
    let second = recommend_pitch_targets(
        &graph.store,
        graph.velvet_static,
        &RecommendOptions::default(),
    )
    .await
    .unwrap();

    let order = |recs: &[promograph::Recommendation]| -> Vec<(String, f64)> {
        recs.iter()
            .map(|rec| (rec.node.name.clone(), rec.score))
            .collect()
    };
    assert_eq!(order(&first), order(&second));
}

#[tokio::test]
async fn test_recommendation_serialization_shape() {
    let graph = PromoGraph::create();

    let targets = recommend_pitch_targets(
        &graph.store,
        graph.velvet_static,
        &RecommendOptions::default(),
    )
    .await
    .unwrap();

    let value = serde_json::to_value(&targets[0]).unwrap();
    assert_eq!(value["node"]["name"], "Amazing Radio");
    assert_eq!(value["node"]["kind"], "radio_host");
    assert_eq!(value["score"], 0.85);
    assert_eq!(value["common_connections"], 1);
    assert!(value["reasoning"].as_str().unwrap().starts_with("Direct"));
}
