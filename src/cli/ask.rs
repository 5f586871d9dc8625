// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Ask command - answer a free-form chat message

use miette::Result;

use crate::config::Settings;

/// Route a message through the command handler and print the reply
pub async fn run(settings: &Settings, message: Vec<String>, verbose: bool) -> Result<()> {
    let handler = super::command_handler(settings, verbose)?;

    let reply = handler.handle(&message.join(" ")).await;
    println!("{}", reply);

    Ok(())
}
