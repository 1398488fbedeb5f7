// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Converter page — pick images, preview and remove them, convert to one PDF.
//
// "Browse Files" (empty selection), "Add More", and files dropped onto the
// page all feed the same selection store.

use std::path::PathBuf;
use std::sync::Arc;

use dioxus::prelude::*;

use imagepdf_core::ConversionStatus;
use imagepdf_core::human_errors::humanize_error;
use imagepdf_document::{ConvertOutcome, SelectionStore};

use crate::services::app_services::{AppServices, pick_image_paths};

/// One thumbnail in the grid.
#[derive(Clone, PartialEq)]
struct Thumbnail {
    name: String,
    uri: Arc<str>,
}

#[component]
pub fn ConverterPage() -> Element {
    let svc = use_context::<AppServices>();
    // Dropping the signal drops the store, which revokes every preview.
    let mut store = use_signal(SelectionStore::new);
    let mut status = use_signal(|| ConversionStatus::Idle);
    let mut status_msg = use_signal(|| Option::<String>::None);

    // Mirror the converter's status (including the timed reset) into the UI.
    use_future({
        let svc = svc.clone();
        move || {
            let mut rx = svc.converter().subscribe();
            async move {
                while rx.changed().await.is_ok() {
                    let current = *rx.borrow_and_update();
                    status.set(current);
                }
            }
        }
    });

    let accept_paths = {
        let svc = svc.clone();
        move |paths: Vec<PathBuf>| {
            if paths.is_empty() {
                return;
            }
            let message = svc.add_paths(&mut store.write(), paths);
            status_msg.set(message);
        }
    };

    let add_files = {
        let mut accept_paths = accept_paths.clone();
        move |_: MouseEvent| accept_paths(pick_image_paths())
    };

    let on_drop = {
        let mut accept_paths = accept_paths;
        move |evt: DragEvent| {
            evt.prevent_default();
            let paths: Vec<PathBuf> = evt.files().into_iter().map(|file| file.path()).collect();
            accept_paths(paths);
        }
    };

    let thumbnails: Vec<Thumbnail> = {
        let selection = store.read();
        selection
            .images()
            .iter()
            .enumerate()
            .map(|(i, image)| Thumbnail {
                name: image.name.clone(),
                uri: selection.preview_uri(i).unwrap_or_default(),
            })
            .collect()
    };
    let count = thumbnails.len();
    let current_status = *status.read();

    rsx! {
        div { class: "converter-container",
            style: "max-width: 800px; margin: 0 auto; border: 1px solid #e0e0e0; border-radius: 12px; background: white;",

            // Header
            div { style: "padding: 16px; border-bottom: 1px solid #e0e0e0;",
                h2 { style: "margin: 0;", "Image to PDF Converter" }
                p { style: "color: #666; margin: 4px 0 0;",
                    "Upload your images and convert them into a single PDF document"
                }
            }

            // Content (also the drop target)
            div { style: "padding: 16px;",
                ondragover: move |evt: DragEvent| evt.prevent_default(),
                ondrop: on_drop,
                if count == 0 {
                    div { style: "border: 2px dashed #ccc; border-radius: 12px; padding: 48px 16px; text-align: center;",
                        div { style: "font-size: 48px; color: #aaa;", "\u{2B06}" }
                        p { style: "color: #666;", "Drop image files here, or pick them to get started" }
                        button {
                            style: "padding: 10px 20px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px;",
                            onclick: add_files.clone(),
                            "Browse Files"
                        }
                    }
                } else {
                    div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 12px;",
                        h3 { style: "margin: 0;", "Selected Images ({count})" }
                        button {
                            style: "padding: 6px 14px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white;",
                            onclick: add_files.clone(),
                            "Add More"
                        }
                    }

                    div { style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(140px, 1fr)); gap: 12px;",
                        for (i, thumb) in thumbnails.into_iter().enumerate() {
                            div { key: "{i}",
                                style: "position: relative; border: 1px solid #e0e0e0; border-radius: 8px; overflow: hidden;",
                                div { style: "height: 120px; display: flex; align-items: center; justify-content: center; background: #f5f5f5;",
                                    img {
                                        style: "max-width: 100%; max-height: 100%; object-fit: contain;",
                                        src: "{thumb.uri}",
                                        alt: "{thumb.name}",
                                    }
                                }
                                div { style: "padding: 4px 8px; font-size: 12px; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                                    "{thumb.name}"
                                }
                                button {
                                    style: "position: absolute; top: 4px; right: 4px; width: 24px; height: 24px; border-radius: 12px; border: none; background: rgba(0,0,0,0.6); color: white;",
                                    onclick: move |_| {
                                        if let Err(e) = store.write().remove_file(i) {
                                            tracing::warn!(index = i, error = %e, "remove failed");
                                            status_msg.set(Some(humanize_error(&e).message));
                                        }
                                    },
                                    "\u{2715}"
                                }
                            }
                        }
                    }
                }
            }

            // Footer
            div { style: "padding: 16px; border-top: 1px solid #e0e0e0; text-align: right;",
                button {
                    style: "padding: 12px 24px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px;",
                    disabled: !current_status.can_start(count),
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let images = store.read().snapshot();
                            let converter = svc.converter();
                            status_msg.set(None);
                            spawn(async move {
                                match converter.convert(&images).await {
                                    Ok(ConvertOutcome::Saved { path, pages }) => {
                                        tracing::info!(path = %path.display(), pages, "PDF saved");
                                        status_msg.set(Some(format!(
                                            "Saved {pages} page(s) to {}",
                                            path.display()
                                        )));
                                    }
                                    Ok(ConvertOutcome::NothingSelected)
                                    | Ok(ConvertOutcome::AlreadyRunning) => {}
                                    Err(e) => {
                                        status_msg.set(Some(humanize_error(&e).to_string()));
                                    }
                                }
                            });
                        }
                    },
                    "{current_status.label()}"
                }

                if let Some(ref msg) = *status_msg.read() {
                    p { style: "margin-top: 12px; color: #666; font-size: 14px; text-align: center;",
                        "{msg}"
                    }
                }
            }
        }
    }
}
