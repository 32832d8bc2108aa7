use super::*;
use crate::chain::ChainError;
use crate::registry::Registry;
use crate::state::test_helpers::{self, MockChain};

fn loaded_board(chain: &MockChain, external: &[u128], local: &[u128]) -> AssetBoard {
    let mut board = AssetBoard::new(Network::Moonriver);
    for (kind, ids) in [(RegistryKind::External, external), (RegistryKind::Local, local)] {
        let records = ids.iter().map(|id| test_helpers::record_from(chain, kind, *id)).collect();
        let ticket = board.begin_load(kind);
        board.finish_load(ticket, Ok(Registry::from_enumerated(kind, records)));
    }
    board
}

const ALL_STEPS: [RefreshStep; 3] = [
    RefreshStep::Started,
    RefreshStep::Finished(RegistryKind::External),
    RefreshStep::Finished(RegistryKind::Local),
];

fn render_page(board: &AssetBoard) -> String {
    ALL_STEPS.into_iter().map(|step| render_step(board, step)).collect()
}

fn sample_chain() -> MockChain {
    MockChain::new()
        .with_external(42, "Polkadot", "xcDOT", test_helpers::relay_location())
        .with_external(43, "Acala", "xcACA", test_helpers::parachain_location(2000))
        .with_local(7, "Local Token", "LTK")
}

// =========================================================================
// formatting
// =========================================================================

#[test]
fn group_digits_inserts_separators() {
    assert_eq!(group_digits(0), "0");
    assert_eq!(group_digits(999), "999");
    assert_eq!(group_digits(1_000), "1,000");
    assert_eq!(group_digits(1_234_567), "1,234,567");
    assert_eq!(group_digits(u128::MAX), "340,282,366,920,938,463,463,374,607,431,768,211,455");
}

#[test]
fn detail_rows_follow_display_order() {
    let record = test_helpers::record_from(&sample_chain(), RegistryKind::External, 42);
    let labels: Vec<&str> = detail_rows(&record).into_iter().map(|(label, _)| label).collect();
    assert_eq!(
        labels,
        vec![
            "Owner",
            "Issuer",
            "Admin",
            "Freezer",
            "Supply",
            "Deposit",
            "Min. Balance",
            "Accounts",
            "Sufficients",
            "Approvals"
        ]
    );
}

#[test]
fn detail_rows_format_values() {
    let record = test_helpers::record_from(&sample_chain(), RegistryKind::External, 42);
    let rows = detail_rows(&record);
    assert_eq!(rows[0].1, record.info.owner.to_string());
    assert_eq!(rows[4].1, "1,000,042");
    assert_eq!(rows[6].1, "1");
    assert_eq!(rows[7].1, "12");
}

// =========================================================================
// page rendering
// =========================================================================

#[test]
fn page_is_a_full_document() {
    let html = render_page(&AssetBoard::new(Network::Moonbeam));
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("XC-20s Dashboard"));
    assert!(html.contains("External XC-20s"));
    assert!(html.contains("Local XC-20s"));
    assert!(html.contains("Moonbase Alpha"));
    assert!(!html.contains("Oops!"));
}

#[test]
fn page_lists_records_with_para_id_column_for_external_only() {
    let board = loaded_board(&sample_chain(), &[42, 43], &[7]);
    let html = render_page(&board);

    assert_eq!(html.matches("Para-ID").count(), 1);
    assert!(html.contains("Polkadot"));
    assert!(html.contains("xcACA"));
    assert!(html.contains("Local Token"));
    assert!(html.contains(&derived_address_of(42)));
    assert!(html.contains("2000"));
    assert!(html.contains("Relay"));
}

#[test]
fn page_shows_detail_rows_only_for_focused_asset() {
    let mut board = loaded_board(&sample_chain(), &[42, 43], &[7]);
    assert!(!render_page(&board).contains("Min. Balance"));

    board.select(RegistryKind::External, Some(9_999));
    assert!(!render_page(&board).contains("Min. Balance"));

    board.select(RegistryKind::External, Some(43));
    let html = render_page(&board);
    assert_eq!(html.matches("Min. Balance").count(), 1);
    assert!(html.contains("1,000,043"));
}

#[test]
fn page_shows_error_banner() {
    let mut board = AssetBoard::new(Network::Moonbeam);
    let ticket = board.begin_load(RegistryKind::External);
    board.finish_load(ticket, Err(ChainError::Request("connection refused".into())));

    let html = render_page(&board);
    assert!(html.contains("Oops!"));
    assert!(html.contains("RPC request failed: connection refused"));
}

#[test]
fn page_shows_loading_indicator_while_loading() {
    let mut board = AssetBoard::new(Network::Moonbeam);
    assert!(!render_page(&board).contains("Loading"));
    let _ticket = board.begin_load(RegistryKind::Local);
    assert_eq!(render_page(&board).matches("Loading").count(), 1);
}

#[test]
fn page_links_source_and_shows_network_avatar() {
    let html = render_page(&AssetBoard::new(Network::Moonriver));
    assert!(html.contains(r#"src="/moonriver.png""#));
    assert!(!html.contains("/moonbeam.png"));
    assert!(html.contains(r#"href="/favicon.png""#));
    assert!(html.contains(r#"href="https://github.com/albertov19/localAsset-dashboard""#));
}

// =========================================================================
// streamed slices
// =========================================================================

#[test]
fn first_slice_carries_only_the_external_loader() {
    let mut board = AssetBoard::new(Network::Moonbeam);
    board.begin_load(RegistryKind::External);
    board.begin_load(RegistryKind::Local);

    let html = render_step(&board, RefreshStep::Started);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Moonbase Alpha"));
    assert!(html.contains(r#"<div id="external-loader" class="ui active inline centered loader">Loading</div>"#));
    assert!(!html.contains("local-loader"));
    assert!(!html.contains("<table"));
    assert!(!html.contains("</html>"));
}

#[test]
fn later_slices_hide_loaders_of_finished_tables() {
    let chain = sample_chain();
    let mut board = AssetBoard::new(Network::Moonbeam);
    let external = board.begin_load(RegistryKind::External);
    let local = board.begin_load(RegistryKind::Local);
    let records = vec![test_helpers::record_from(&chain, RegistryKind::External, 42)];
    board.finish_load(external, Ok(Registry::from_enumerated(RegistryKind::External, records)));

    let middle = render_step(&board, RefreshStep::Finished(RegistryKind::External));
    assert!(middle.contains("<table"));
    assert!(!middle.contains("<!DOCTYPE html>"));
    assert!(middle.contains("Polkadot"));
    assert!(middle.contains("<style>#external-loader{display:none}</style>"));
    assert!(middle.contains(r#"id="local-loader""#));

    board.finish_load(local, Err(ChainError::Request("timeout".into())));
    let last = render_step(&board, RefreshStep::Finished(RegistryKind::Local));
    assert!(last.contains("<style>#local-loader{display:none}</style>"));
    assert!(last.contains("Oops!"));
    assert!(last.ends_with("</div></body></html>"));
}

#[test]
fn page_escapes_on_chain_text() {
    let chain = MockChain::new().with_local(1, "<script>alert(1)</script>", "X");
    let board = loaded_board(&chain, &[], &[1]);
    let html = render_page(&board);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

fn derived_address_of(asset_id: u128) -> String {
    crate::address::derived_address(asset_id).to_string()
}
