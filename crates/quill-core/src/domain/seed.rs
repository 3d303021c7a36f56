//! Built-in sample content, inserted when the store is empty on first run.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::post::{Post, PostCategory};
use super::text;

struct SamplePost {
    id: u128,
    title: &'static str,
    slug: &'static str,
    summary: &'static str,
    content: &'static str,
    category: PostCategory,
    tags: &'static [&'static str],
    days_ago: i64,
    featured: bool,
}

const SAMPLES: &[SamplePost] = &[
    SamplePost {
        id: 0x5eed_0000_0000_4000_8000_0000_0000_0001,
        title: "React 19: The Compiler Era and the End of Hook Juggling",
        slug: "react-19-compiler-and-new-features",
        summary: "The React Compiler makes useMemo and useCallback mostly unnecessary. A look at the biggest shift in frontend development in years.",
        content: r#"
# React 19 and the Compiler Era

React 19 does not just add features; it changes how React decides what to re-render. The headline is the **React Compiler**.

## Goodbye Manual Memoization

For years we sprinkled `useMemo`, `useCallback` and `memo` around to keep renders cheap. The compiler analyses components and inserts memoization where it is actually needed.

### The Actions API

Form handling changes too. `useTransition` together with the new `action` prop takes care of pending and error state for async work.

```jsx
const [isPending, startTransition] = useTransition();
const handleSubmit = () => {
  startTransition(async () => {
    await updateDb();
  });
};
```

React 19 is a large step towards a better developer experience.
"#,
        category: PostCategory::Article,
        tags: &["React", "Frontend", "Web Development"],
        days_ago: 0,
        featured: true,
    },
    SamplePost {
        id: 0x5eed_0000_0000_4000_8000_0000_0000_0002,
        title: "AI Agents: The Next Step After Chatbots",
        slug: "ai-agents-autonomous-systems",
        summary: "From bots that talk to agents that act. Why tool-using, planning LLM systems matter and where they still fall short.",
        content: r#"
# From Chatbots to Autonomous Agents

A language model produces text. An **agent** wraps the model in a loop that can plan, call tools and observe the results.

## The Agent Loop

1. Receive a goal.
2. Plan the next step.
3. Call a tool and observe the outcome.
4. Repeat until the goal is met or the budget runs out.

## Where It Breaks

Long horizons compound small errors. Good agents keep plans short and verify every tool result before moving on.
"#,
        category: PostCategory::Article,
        tags: &["AI", "LLM", "Agents"],
        days_ago: 2,
        featured: true,
    },
    SamplePost {
        id: 0x5eed_0000_0000_4000_8000_0000_0000_0003,
        title: "DevLog #12: Moving the Build from Node.js to Bun",
        slug: "devlog-nodejs-bun-migration",
        summary: "Notes from migrating a mid-sized TypeScript monorepo to Bun: install times, test runner quirks and what we rolled back.",
        content: r#"
# Migrating to Bun

This week the whole monorepo moved from Node.js and npm to Bun.

## Install Times

Cold installs dropped from ninety seconds to under ten.

```bash
bun install
bun test
```

## What We Rolled Back

The test runner handles most of our suites, but two snapshot-heavy packages still run under the old runner until the serializer matches.
"#,
        category: PostCategory::DevLog,
        tags: &["Bun", "Node.js", "Tooling"],
        days_ago: 5,
        featured: false,
    },
    SamplePost {
        id: 0x5eed_0000_0000_4000_8000_0000_0000_0004,
        title: "Project: A Retrieval-Augmented Docs Assistant",
        slug: "project-rag-docs-assistant",
        summary: "Building a question-answering assistant over internal docs with embeddings, a vector index and a hosted language model.",
        content: r#"
# A Docs Assistant with RAG

The goal: answer questions about our internal documentation with citations.

## Architecture

- Split documents into overlapping chunks.
- Embed every chunk and store the vectors.
- At query time, retrieve the closest chunks and pass them to the model as context.

## Lessons

Chunk size mattered more than the choice of model. Small chunks with generous overlap gave the most grounded answers.
"#,
        category: PostCategory::Project,
        tags: &["RAG", "AI", "Embeddings"],
        days_ago: 7,
        featured: true,
    },
    SamplePost {
        id: 0x5eed_0000_0000_4000_8000_0000_0000_0005,
        title: "WebAssembly and the Future of the Browser",
        slug: "webassembly-and-the-future-of-browsers",
        summary: "WebAssembly is no longer just for games. Component model, WASI and what near-native code in the browser means for web apps.",
        content: r#"
# WebAssembly Beyond Games

WebAssembly started as a compilation target for C++ games. Today it runs image editors, databases and language runtimes in the browser.

## The Component Model

Components describe their imports and exports with interfaces, so modules written in different languages can be linked together.

```rust
#[no_mangle]
pub extern "C" fn add(a: i32, b: i32) -> i32 {
    a + b
}
```
"#,
        category: PostCategory::Article,
        tags: &["WebAssembly", "Rust", "Browser"],
        days_ago: 12,
        featured: false,
    },
    SamplePost {
        id: 0x5eed_0000_0000_4000_8000_0000_0000_0006,
        title: "Project: A Terminal Pomodoro Timer in Rust",
        slug: "project-terminal-pomodoro-rust",
        summary: "A weekend project: a tiny terminal timer with desktop notifications, built to learn async Rust.",
        content: r#"
# Terminal Pomodoro

A small weekend project to practise async Rust.

## Design

One task drives the countdown, another listens for key presses, and a channel connects them.

```rust
let (tx, mut rx) = tokio::sync::mpsc::channel(8);
```

## Next Steps

Persist finished sessions and print a weekly summary.
"#,
        category: PostCategory::Project,
        tags: &["Rust", "CLI", "Tokio"],
        days_ago: 15,
        featured: false,
    },
    SamplePost {
        id: 0x5eed_0000_0000_4000_8000_0000_0000_0007,
        title: "Cloud Exit: Why Some Teams Are Moving Back On-Premise",
        slug: "cloud-exit-back-to-on-premise",
        summary: "Rising bills and predictable workloads are pushing some companies out of the public cloud. When does it make sense?",
        content: r#"
# The Cloud Exit

Several well-known companies have published the numbers behind leaving the public cloud.

## When It Pays Off

Steady, predictable workloads with little need for elastic scaling are the best candidates.

## When It Does Not

Small teams without operations experience usually pay more in people than they save in hardware.
"#,
        category: PostCategory::Article,
        tags: &["Cloud", "DevOps", "Infrastructure"],
        days_ago: 20,
        featured: false,
    },
];

/// The built-in sample set, dated relative to `now` and newest first.
pub fn sample_posts(now: DateTime<Utc>) -> Vec<Post> {
    SAMPLES
        .iter()
        .map(|sample| {
            let date = now - Duration::days(sample.days_ago);
            let content = sample.content.trim().to_string();
            Post {
                id: Uuid::from_u128(sample.id),
                title: sample.title.to_string(),
                slug: sample.slug.to_string(),
                summary: sample.summary.to_string(),
                reading_time_minutes: text::estimate_reading_time(&content),
                content,
                image: Some(format!(
                    "https://picsum.photos/800/400?random={}",
                    100 + (sample.id & 0xff)
                )),
                category: sample.category,
                tags: sample.tags.iter().map(|t| t.to_string()).collect(),
                date,
                updated_at: date,
                is_featured: sample.featured,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_samples_satisfy_post_invariants() {
        let now = Utc::now();
        let posts = sample_posts(now);
        assert_eq!(posts.len(), 7);

        let slugs: HashSet<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        let ids: HashSet<_> = posts.iter().map(|p| p.id).collect();
        assert_eq!(slugs.len(), posts.len());
        assert_eq!(ids.len(), posts.len());

        for post in &posts {
            assert!(!post.title.trim().is_empty());
            assert!(!post.content.trim().is_empty());
            assert_eq!(text::derive_slug(&post.slug), post.slug);
            assert_eq!(
                post.reading_time_minutes,
                text::estimate_reading_time(&post.content)
            );
            assert!(post.date <= now);
            assert!(!post.id.is_nil());
        }
        assert!(posts.windows(2).all(|w| w[0].date >= w[1].date));
    }
}
