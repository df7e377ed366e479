//! End-to-end conversations over a shared store, simulating page reloads.

use vida_assistant::{
    CLEARED_GREETING, DEFAULT_GREETING, Inline, MemoryStore, Message, Responder, Role, RuleSet,
    Transcript, parse_inline,
};

fn shape(messages: &[Message]) -> Vec<(Role, String)> {
    messages
        .iter()
        .map(|m| (m.role, m.content.clone()))
        .collect()
}

#[tokio::test]
async fn conversation_survives_reload() {
    let store = MemoryStore::new();

    let before = {
        let mut responder = Responder::local(Transcript::restore(&store));
        responder.send("Quiero afiliarme").await.unwrap();
        responder.send("¿Y los eventos?").await.unwrap();
        responder.transcript().messages().to_vec()
    };

    let after = Transcript::restore(&store);

    assert_eq!(after.len(), 5);
    assert_eq!(shape(after.messages()), shape(&before));
    assert_eq!(after.messages(), before.as_slice());
}

#[test]
fn restore_is_idempotent() {
    let store = MemoryStore::new();

    let first = Transcript::restore(&store);
    let second = Transcript::restore(&store);

    assert_eq!(first.messages(), second.messages());
    assert_eq!(first.messages()[0].content, DEFAULT_GREETING);
}

#[tokio::test]
async fn clear_then_reload_keeps_single_greeting() {
    let store = MemoryStore::new();
    {
        let mut responder = Responder::local(Transcript::restore(&store));
        responder.send("hola").await.unwrap();
        responder.clear();
    }

    let restored = Transcript::restore(&store);

    assert_eq!(restored.len(), 1);
    assert_eq!(restored.messages()[0].role, Role::Assistant);
    assert_eq!(restored.messages()[0].content, CLEARED_GREETING);
}

#[tokio::test]
async fn fallback_reply_is_deterministic() {
    let rules = RuleSet::builtin();
    let inputs = [
        "quiero afiliarme y ser voluntario",
        "¿Cómo me hago voluntario?",
        "¿Cuáles son los próximos eventos?",
        "Necesito el PDF de los estatutos",
        "¿Me pasan su WhatsApp?",
        "buen día",
    ];

    for input in inputs {
        let mut a = Responder::local(Transcript::restore(MemoryStore::new()));
        let mut b = Responder::local(Transcript::restore(MemoryStore::new()));

        let reply_a = a.send(input).await.unwrap().reply.content;
        let reply_b = b.send(input).await.unwrap().reply.content;

        assert_eq!(reply_a, reply_b);
        assert_eq!(reply_a, rules.respond(input));
    }
}

#[tokio::test]
async fn exactly_two_messages_per_send() {
    let mut responder = Responder::local(Transcript::restore(MemoryStore::new()));

    for (i, input) in ["uno", " ", "dos", "", "tres"].into_iter().enumerate() {
        let before = responder.transcript().len();
        let exchange = responder.send(input).await;
        let after = responder.transcript().len();

        if input.trim().is_empty() {
            assert!(exchange.is_none(), "input #{i}");
            assert_eq!(after, before);
        } else {
            assert_eq!(after, before + 2);
            let tail = &responder.transcript().messages()[before..];
            assert_eq!(tail[0].role, Role::User);
            assert_eq!(tail[1].role, Role::Assistant);
        }
    }
}

#[tokio::test]
async fn canned_replies_carry_markup() {
    let mut responder = Responder::local(Transcript::restore(MemoryStore::new()));

    let exchange = responder.send("Quiero afiliarme").await.unwrap();
    let nodes = parse_inline(&exchange.reply.content);

    assert!(nodes.iter().any(|n| matches!(n, Inline::Strong(s) if s == "afiliarte")));
}
