//! End-to-end routing through the production handler chain with a recording bot.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{message, settings, RecordingBot, Script, ScriptedProvider};
use relay_bot::handlers::{HELP_TEXT, MSG_IMAGE_USAGE};
use relay_bot::orchestrator::MSG_NOT_ALLOWED;
use relay_bot::{build_handler_chain, HandlerChain, StaticAllowList};
use relay_core::{HandlerResponse, MarkupDialect, PresenceSignal};
use tokio::sync::RwLock;

fn chain(
    bot: Arc<RecordingBot>,
    provider: Arc<ScriptedProvider>,
    allowed: &[i64],
    username: Option<&str>,
) -> HandlerChain {
    build_handler_chain(
        bot,
        provider,
        Arc::new(StaticAllowList::new(allowed.iter().copied())),
        settings(),
        Arc::new(RwLock::new(username.map(str::to_string))),
    )
}

/// **Test: /start greets with an HTML mention, even for users not on the allow-list.**
#[tokio::test]
async fn test_start_is_not_gated() {
    let bot = RecordingBot::new();
    let provider = ScriptedProvider::new(Script::Empty, Duration::ZERO);
    let chain = chain(bot.clone(), provider.clone(), &[], None);

    let mut msg = message(42, "1", "/start");
    msg.user.first_name = Some("Tom & Jerry".to_string());
    let response = chain.handle(&msg).await.unwrap();

    let greeting = "Shalom <a href=\"tg://user?id=42\">Tom &amp; Jerry</a>!".to_string();
    assert_eq!(response, HandlerResponse::Reply(greeting.clone()));
    assert_eq!(bot.replies(), vec![(greeting, MarkupDialect::Html)]);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_help_and_image_usage() {
    let bot = RecordingBot::new();
    let provider = ScriptedProvider::new(Script::Empty, Duration::ZERO);
    let chain = chain(bot.clone(), provider.clone(), &[], None);

    chain.handle(&message(42, "1", "/help")).await.unwrap();
    chain.handle(&message(42, "2", "/image")).await.unwrap();

    assert_eq!(
        bot.replies(),
        vec![
            (HELP_TEXT.to_string(), MarkupDialect::Plain),
            (MSG_IMAGE_USAGE.to_string(), MarkupDialect::Plain),
        ]
    );
    assert!(bot.actions().is_empty());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_text_goes_through_orchestrator() {
    let bot = RecordingBot::new();
    let provider = ScriptedProvider::new(Script::Text("4".to_string()), Duration::from_millis(1500));
    let chain = chain(bot.clone(), provider.clone(), &[7], None);

    let response = chain.handle(&message(7, "3", "2+2?")).await.unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert_eq!(provider.calls(), 1);
    assert_eq!(bot.actions(), vec![PresenceSignal::Typing; 2]);
    assert_eq!(bot.replies(), vec![("4".to_string(), MarkupDialect::MarkdownV2)]);
}

#[tokio::test(start_paused = true)]
async fn test_addressed_image_command() {
    let bot = RecordingBot::new();
    let provider = ScriptedProvider::new(Script::Image(vec![1, 2, 3]), Duration::from_millis(500));
    let chain = chain(bot.clone(), provider.clone(), &[7], Some("relaybot"));

    chain
        .handle(&message(7, "4", "/image@relaybot a red fox"))
        .await
        .unwrap();
    chain
        .handle(&message(7, "5", "/image@otherbot a red fox"))
        .await
        .unwrap();

    assert_eq!(provider.calls(), 1);
    assert_eq!(bot.actions(), vec![PresenceSignal::UploadPhoto]);
}

#[tokio::test]
async fn test_rejected_text_request() {
    let bot = RecordingBot::new();
    let provider = ScriptedProvider::new(Script::Text("unused".to_string()), Duration::ZERO);
    let chain = chain(bot.clone(), provider.clone(), &[7], None);

    let response = chain.handle(&message(42, "6", "image a cat")).await.unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert_eq!(provider.calls(), 0);
    assert_eq!(bot.replies(), vec![(MSG_NOT_ALLOWED.to_string(), MarkupDialect::Plain)]);
}

#[tokio::test]
async fn test_unknown_command_and_non_text_are_ignored() {
    let bot = RecordingBot::new();
    let provider = ScriptedProvider::new(Script::Text("unused".to_string()), Duration::ZERO);
    let chain = chain(bot.clone(), provider.clone(), &[7], None);

    let response = chain.handle(&message(7, "7", "/settings")).await.unwrap();
    assert_eq!(response, HandlerResponse::Continue);

    let mut sticker = message(7, "8", "");
    sticker.message_type = "other".to_string();
    let response = chain.handle(&sticker).await.unwrap();
    assert_eq!(response, HandlerResponse::Continue);

    assert!(bot.events().is_empty());
    assert_eq!(provider.calls(), 0);
}
