use super::*;
use crate::chain::types::decode_value;
use codec::Encode;

fn parachain(id: u32) -> Vec<u8> {
    let mut out = vec![JUNCTION_PARACHAIN];
    out.extend(Compact(id).encode());
    out
}

/// `AssetType::Xcm { parents, interior: <tag> <junctions...> }`.
fn xcm_location(parents: u8, interior_tag: u8, junctions: &[Vec<u8>]) -> Vec<u8> {
    let mut out = vec![ASSET_TYPE_XCM, parents, interior_tag];
    for j in junctions {
        out.extend_from_slice(j);
    }
    out
}

fn decode(bytes: &[u8]) -> AssetLocation {
    decode_value("multilocation", bytes).unwrap()
}

#[test]
fn direct_parachain_junction_names_origin() {
    let location = decode(&xcm_location(1, INTERIOR_X1, &[parachain(2004)]));
    assert_eq!(location.parents, 1);
    assert_eq!(location.interior, Interior::Single(Junction::Parachain(2004)));
    assert_eq!(location.parachain_origin(), ParachainOrigin::Parachain(2004));
}

#[test]
fn collection_headed_by_parachain_names_origin() {
    // X2(Parachain(2023), PalletInstance(10)): the tail is not decoded.
    let location = decode(&xcm_location(1, 2, &[parachain(2023), vec![4, 10]]));
    assert_eq!(location.interior, Interior::Collection { len: 2, head: Junction::Parachain(2023) });
    assert_eq!(location.parachain_origin(), ParachainOrigin::Parachain(2023));
}

#[test]
fn relay_location_without_interior_is_relay() {
    let location = decode(&xcm_location(1, INTERIOR_HERE, &[]));
    assert_eq!(location.interior, Interior::Here);
    assert_eq!(location.parachain_origin(), ParachainOrigin::Relay);
}

#[test]
fn collection_headed_by_other_junction_is_relay() {
    // X2(PalletInstance(50), GeneralIndex(..)) on the relay's asset hub view.
    let location = decode(&xcm_location(1, 2, &[vec![4, 50], vec![5, 0x04]]));
    assert_eq!(location.interior, Interior::Collection { len: 2, head: Junction::Other { tag: 4 } });
    assert_eq!(location.parachain_origin(), ParachainOrigin::Relay);
}

#[test]
fn unknown_asset_type_defaults_to_relay() {
    let location = decode(&[7, 1, 1, 0, 4]);
    assert_eq!(location.interior, Interior::Unrecognized { tag: 7 });
    assert_eq!(location.parachain_origin(), ParachainOrigin::Relay);
}

#[test]
fn unknown_interior_tag_defaults_to_relay() {
    let location = decode(&xcm_location(0, 9, &[]));
    assert_eq!(location.interior, Interior::Unrecognized { tag: 9 });
    assert_eq!(location.parachain_origin(), ParachainOrigin::Relay);
}

#[test]
fn truncated_location_is_decode_error() {
    let bytes = xcm_location(1, INTERIOR_X1, &[]);
    assert!(decode_value::<AssetLocation>("multilocation", &bytes).is_err());
}

#[test]
fn relay_orders_after_every_parachain() {
    let mut origins = vec![ParachainOrigin::Relay, ParachainOrigin::Parachain(2004), ParachainOrigin::Parachain(1000)];
    origins.sort();
    assert_eq!(
        origins,
        vec![ParachainOrigin::Parachain(1000), ParachainOrigin::Parachain(2004), ParachainOrigin::Relay]
    );
}

#[test]
fn origin_display_and_json() {
    assert_eq!(ParachainOrigin::Parachain(2004).to_string(), "2004");
    assert_eq!(ParachainOrigin::Relay.to_string(), "Relay");
    assert_eq!(serde_json::to_value(ParachainOrigin::Parachain(2004)).unwrap(), serde_json::json!(2004));
    assert_eq!(serde_json::to_value(ParachainOrigin::Relay).unwrap(), serde_json::json!("Relay"));
}
