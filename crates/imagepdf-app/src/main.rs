// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imagepdf — combine images into one PDF.
//
// Entry point. Initialises logging and backend services, and launches the
// Dioxus UI.

mod pages;
mod services;

use dioxus::prelude::*;

use pages::converter::ConverterPage;
use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("imagepdf starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(AppServices::init);
    use_context_provider(|| svc.clone());

    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; min-height: 100vh; font-family: system-ui, -apple-system, sans-serif; background: #f5f5f7;",

            header { style: "padding: 16px; text-align: center;",
                h1 { style: "margin: 0;", "Image to PDF Converter" }
            }

            main { style: "flex: 1; padding: 16px;",
                ConverterPage {}
            }

            footer { style: "padding: 8px; text-align: center; color: #999; font-size: 12px;",
                p { "Everything stays on this computer." }
            }
        }
    }
}
