use serde_json::{json, Value};

use domain::{Comment, Gbairai};

const BASE_URL: &str = "http://127.0.0.1:3000";

const SAMPLES: &[&str] = &[
    "Mon frère, on est enjaillé ce soir, même pas fatigue !",
    "Yako, c'est pas facile hein, je suis vraiment en colère",
    "Je vais te tuer espèce de connard",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    println!("Starting Gbairai test client...");

    println!("\n[1/4] Checking server health...");
    let health: Value = client
        .get(format!("{}/api/health", BASE_URL))
        .send()
        .await?
        .json()
        .await?;
    println!("   -> {}", health);

    println!("\n[2/4] Running samples through the analysis endpoints...");
    for sample in SAMPLES {
        println!("   \"{}\"", sample);

        let validation: Value = client
            .post(format!("{}/api/validate-content", BASE_URL))
            .json(&json!({ "content": sample }))
            .send()
            .await?
            .json()
            .await?;
        println!(
            "      validate: valid={} issues={}",
            validation["isValid"], validation["issues"]
        );

        let moderation: Value = client
            .post(format!("{}/api/moderate-content", BASE_URL))
            .json(&json!({ "content": sample }))
            .send()
            .await?
            .json()
            .await?;
        println!(
            "      moderate: approved={} reason={}",
            moderation["approved"], moderation["reason"]
        );

        let emotion: Value = client
            .post(format!("{}/api/analyze-emotion", BASE_URL))
            .json(&json!({ "text": sample, "language": "fr-ci" }))
            .send()
            .await?
            .json()
            .await?;
        println!(
            "      emotion: {} ({})",
            emotion["emotion"], emotion["confidence"]
        );
    }

    println!("\n[3/4] Publishing a gbairai, a comment and a reply...");
    let resp = client
        .post(format!("{}/api/gbairais", BASE_URL))
        .json(&json!({ "content": SAMPLES[0] }))
        .send()
        .await?;
    if !resp.status().is_success() {
        println!("   -> ❌ Gbairai refused: {:?}", resp.text().await?);
        return Ok(());
    }
    let gbairai: Gbairai = resp.json().await?;
    println!("   -> ✅ Gbairai {} saved (emotion: {})", gbairai.id, gbairai.emotion);

    let comments_url = format!("{}/api/gbairais/{}/comments", BASE_URL, gbairai.id);
    let resp = client
        .post(&comments_url)
        .json(&json!({
            "authorId": 1,
            "authorName": "Ferris",
            "content": "Bonne arrivée sur Gbairai !",
        }))
        .send()
        .await?;

    if !resp.status().is_success() {
        println!("   -> ❌ Failed to send: {:?}", resp.text().await?);
        return Ok(());
    }
    let top: Comment = resp.json().await?;
    println!("   -> ✅ Comment {} saved", top.id);

    let resp = client
        .post(&comments_url)
        .json(&json!({
            "authorId": 2,
            "authorName": "Awa",
            "content": "@Ferris merci, on est ensemble !",
            "parentCommentId": top.id,
        }))
        .send()
        .await?;
    if resp.status().is_success() {
        println!("   -> ✅ Reply saved");
    } else {
        println!("   -> ❌ Reply refused: {:?}", resp.text().await?);
    }

    println!("\n[4/4] Fetching the thread...");
    let replies: Vec<Value> = client
        .get(format!("{}/api/comments/{}/replies", BASE_URL, top.id))
        .send()
        .await?
        .json()
        .await?;

    println!("   -> {} repl(y/ies) under #{}:", replies.len(), top.id);
    for r in replies {
        let marker = if r["isDirectReply"] == true { "" } else { "  ↳ " };
        println!("      {}{}: {}", marker, r["authorName"], r["content"]);
    }

    Ok(())
}
