//! Server-rendered dashboard page.
//!
//! DESIGN
//! ======
//! Leptos components rendered with `to_html`. The page is plain HTML forms:
//! the network menu submits to `/select`, and each asset picker submits back
//! to `/` with the focused id in the query string, so the page works without
//! client-side script.
//!
//! STREAMING
//! =========
//! The document is cut into one slice per [`RefreshStep`]. The first slice
//! ends with the external heading and its loader, so it can be flushed
//! before any registry has arrived. Each later slice starts with the table
//! whose load just finished and a style rule that hides that table's loader.

use leptos::prelude::*;

use crate::board::{AssetBoard, RefreshStep, RegistryPanel};
use crate::chain::RegistryKind;
use crate::network::{Network, network_options};
use crate::registry::{AssetRecord, DropdownOption};

const STYLESHEET_URL: &str = "https://cdn.jsdelivr.net/npm/semantic-ui@2.4.2/dist/semantic.min.css";
const SOURCE_URL: &str = "https://github.com/albertov19/localAsset-dashboard";

/// The slice of the document that is final once `step` is reached.
#[must_use]
pub fn render_step(board: &AssetBoard, step: RefreshStep) -> String {
    let network = board.network();
    let external = board.panel(RegistryKind::External).clone();
    let local = board.panel(RegistryKind::Local).clone();
    let (external_loading, local_loading) = (external.loading, local.loading);

    match step {
        RefreshStep::Started => {
            let head = render_view(|| view! { <PageHead/> });
            let top = render_view(move || {
                view! {
                    <NetworkMenu network=network/>
                    <SectionHeading kind=RegistryKind::External loading=external_loading/>
                }
            });
            format!(r#"<!DOCTYPE html><html lang="en">{head}<body><div class="ui container">{top}"#)
        }
        RefreshStep::Finished(RegistryKind::External) => render_view(move || {
            view! {
                <AssetTable kind=RegistryKind::External panel=external/>
                <LoaderDone kind=RegistryKind::External loading=external_loading/>
                <SectionHeading kind=RegistryKind::Local loading=local_loading/>
            }
        }),
        RefreshStep::Finished(RegistryKind::Local) => {
            let external_detail = board.focused(RegistryKind::External).cloned();
            let local_detail = board.focused(RegistryKind::Local).cloned();
            let error = board.error().map(str::to_string);
            let rest = render_view(move || {
                let external_focus = external.focus;
                let local_focus = local.focus;
                view! {
                    <AssetTable kind=RegistryKind::Local panel=local.clone()/>
                    <LoaderDone kind=RegistryKind::Local loading=local_loading/>
                    <div class="ui two column grid">
                        <div class="column">
                            <AssetPicker
                                kind=RegistryKind::External
                                network=network
                                panel=external
                                other_focus=local_focus
                            />
                            <AssetDetail record=external_detail/>
                        </div>
                        <div class="column">
                            <AssetPicker
                                kind=RegistryKind::Local
                                network=network
                                panel=local
                                other_focus=external_focus
                            />
                            <AssetDetail record=local_detail/>
                        </div>
                    </div>
                    <ErrorBanner message=error/>
                    <SourceFooter/>
                }
            });
            format!("{rest}</div></body></html>")
        }
    }
}

fn render_view<V: IntoView>(build: impl FnOnce() -> V) -> String {
    let owner = Owner::new();
    owner.with(move || build().to_html())
}

// =============================================================================
// COMPONENTS
// =============================================================================

#[component]
pub fn PageHead() -> impl IntoView {
    view! {
        <head>
            <meta charset="utf-8"/>
            <title>"XC-20s Dashboard"</title>
            <link rel="icon" type="image/png" sizes="32x32" href="/favicon.png"/>
            <link rel="stylesheet" href=STYLESHEET_URL/>
        </head>
    }
}

/// Header menu with the network dropdown.
#[component]
pub fn NetworkMenu(network: Network) -> impl IntoView {
    let options = network_options()
        .into_iter()
        .map(|option| {
            let selected = option.value == network.as_str();
            view! {
                <option value=option.value selected=selected>
                    {option.text}
                </option>
            }
        })
        .collect_view();

    view! {
        <div class="ui menu">
            <a class="item" href="/">"XC-20s Dashboard"</a>
            <div class="right item">
                <img class="ui avatar image" src=network.avatar() alt=network.label()/>
                <form class="ui form" method="get" action="/select">
                    <select class="ui dropdown" name="network" aria-label="Select Network">
                        {options}
                    </select>
                    <button class="ui button" type="submit">"Switch"</button>
                </form>
            </div>
        </div>
    }
}

/// Table heading plus, while `kind` is loading, its loader.
#[component]
pub fn SectionHeading(kind: RegistryKind, loading: bool) -> impl IntoView {
    view! {
        <h2>{table_heading(kind)}</h2>
        {loading.then(|| {
            view! { <div id=loader_id(kind) class="ui active inline centered loader">"Loading"</div> }
        })}
    }
}

/// Hides the loader of a heading flushed before `kind` finished loading.
#[component]
pub fn LoaderDone(kind: RegistryKind, loading: bool) -> impl IntoView {
    (!loading).then(|| view! { <style>{format!("#{}{{display:none}}", loader_id(kind))}</style> })
}

/// One registry table. External tables carry the Para-ID column.
#[component]
pub fn AssetTable(kind: RegistryKind, panel: RegistryPanel) -> impl IntoView {
    let external = kind == RegistryKind::External;
    let rows = panel
        .records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let origin = external.then(|| view! { <td>{origin_label(&record)}</td> });
            view! {
                <tr>
                    <td>{index.to_string()}</td>
                    <td>{record.name}</td>
                    <td>{record.symbol}</td>
                    <td>{record.derived_address.to_string()}</td>
                    <td>{record.decimals.to_string()}</td>
                    <td>{record.asset_id.to_string()}</td>
                    {origin}
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="ui single line table">
            <thead>
                <tr>
                    <th>"#"</th>
                    <th>"Asset Name"</th>
                    <th>"Symbol"</th>
                    <th>"XC-20 Address"</th>
                    <th>"Decimals"</th>
                    <th>"Asset ID"</th>
                    {external.then(|| view! { <th>"Para-ID"</th> })}
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

/// Asset dropdown. Submits to `/` keeping the network and the other picker's focus.
#[component]
pub fn AssetPicker(
    kind: RegistryKind,
    network: Network,
    panel: RegistryPanel,
    other_focus: Option<u128>,
) -> impl IntoView {
    let other_kind = match kind {
        RegistryKind::External => RegistryKind::Local,
        RegistryKind::Local => RegistryKind::External,
    };
    let focus = panel.focus.map(|id| id.to_string());
    let options = panel
        .options
        .into_iter()
        .map(|DropdownOption { key, text, value }| {
            let selected = focus.as_deref() == Some(key.as_str());
            view! { <option value=value selected=selected>{text}</option> }
        })
        .collect_view();

    view! {
        <h3>{picker_heading(kind)}</h3>
        <form class="ui form" method="get" action="/">
            <input type="hidden" name="network" value=network.as_str()/>
            {other_focus.map(|id| view! { <input type="hidden" name=other_kind.as_str() value=id.to_string()/> })}
            <select class="ui dropdown" name=kind.as_str() aria-label=picker_placeholder(kind)>
                <option value="">{picker_placeholder(kind)}</option>
                {options}
            </select>
            <button class="ui button" type="submit">"Show"</button>
        </form>
    }
}

/// Label/value rows for the focused asset; nothing when no record is focused.
#[component]
pub fn AssetDetail(record: Option<AssetRecord>) -> impl IntoView {
    record.map(|record| {
        let rows = detail_rows(&record)
            .into_iter()
            .map(|(label, value)| view! { <tr><td>{label}</td><td>{value}</td></tr> })
            .collect_view();
        view! {
            <table class="ui definition single line table">
                <tbody>{rows}</tbody>
            </table>
        }
    })
}

#[component]
pub fn ErrorBanner(message: Option<String>) -> impl IntoView {
    message.map(|message| {
        view! {
            <div class="ui error message">
                <div class="header">"Oops!"</div>
                <p>{message}</p>
            </div>
        }
    })
}

#[component]
pub fn SourceFooter() -> impl IntoView {
    view! {
        <p>
            "Don't judge the code :) as it is for demonstration purposes only. You can check the source code "
            <a href=SOURCE_URL>"here"</a>
        </p>
    }
}

// =============================================================================
// FORMATTING
// =============================================================================

fn loader_id(kind: RegistryKind) -> String {
    format!("{}-loader", kind.as_str())
}

fn table_heading(kind: RegistryKind) -> &'static str {
    match kind {
        RegistryKind::External => "External XC-20s",
        RegistryKind::Local => "Local XC-20s",
    }
}

fn picker_heading(kind: RegistryKind) -> &'static str {
    match kind {
        RegistryKind::External => "External Asset Info",
        RegistryKind::Local => "Local Asset Info",
    }
}

fn picker_placeholder(kind: RegistryKind) -> &'static str {
    match kind {
        RegistryKind::External => "Select External Asset",
        RegistryKind::Local => "Select Local Asset",
    }
}

fn origin_label(record: &AssetRecord) -> String {
    record.parachain_origin.map(|origin| origin.to_string()).unwrap_or_default()
}

/// Detail panel rows in display order.
#[must_use]
pub fn detail_rows(record: &AssetRecord) -> Vec<(&'static str, String)> {
    let info = &record.info;
    vec![
        ("Owner", info.owner.to_string()),
        ("Issuer", info.issuer.to_string()),
        ("Admin", info.admin.to_string()),
        ("Freezer", info.freezer.to_string()),
        ("Supply", group_digits(info.supply)),
        ("Deposit", group_digits(info.deposit)),
        ("Min. Balance", group_digits(info.min_balance)),
        ("Accounts", group_digits(u128::from(info.accounts))),
        ("Sufficients", group_digits(u128::from(info.sufficients))),
        ("Approvals", group_digits(u128::from(info.approvals))),
    ]
}

/// `1234567` -> `"1,234,567"`.
#[must_use]
pub fn group_digits(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
