#[cfg(test)]
pub const POST_HELLO_WORLD: &str = r##"---
title: Hello world
date: 2024-01-02
tags:
  - intro
  - meta
---

Welcome to the new site.

<!-- note to self: add a photo -->

```rust
fn main() {
    println!("hello");
}
```
"##;

#[cfg(test)]
pub const POST_TOML: &str = r##"+++
title = "Written in TOML"
date = 2023-11-20T08:30:00
draft = false
categories = ["notes"]
+++
Body text.
"##;

#[cfg(test)]
pub const POST_DRAFT: &str = r##"---
title: Work in progress
date: 2024-02-10
draft: true
---
Not ready yet.
"##;

#[cfg(test)]
pub const POST_UNDATED: &str = r##"---
title: Colophon & tools
categories: [about]
---
How this site is made.
"##;

#[cfg(test)]
pub const POST_NO_TITLE: &str = r##"---
date: 2024-03-01
---
Who am I?
"##;
