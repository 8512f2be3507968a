//! Integration tests for block hashing and chain management

use bpmchain::blockchain::{validate_chain, Block, Blockchain};
use bpmchain::crypto::{calculate_hash, is_hex_digest, FieldEncoding};
use bpmchain::error::ChainError;

const GENESIS_TS: &str = "2024-06-24T00:00:00Z";
const GENESIS_DECIMAL: &str = "b749dc3ad28e40737fcd04fa84c0243e926e4629a56e8e344ef6e35f8b32b1d0";

/// Helper to build a chain with deterministic timestamps
fn build_chain(values: &[i64], encoding: FieldEncoding) -> Result<Blockchain, ChainError> {
    let mut chain = Blockchain::with_genesis(GENESIS_TS, encoding);
    for (i, value) in values.iter().enumerate() {
        let block = chain.generate_block_at(*value, format!("2024-06-24T00:{:02}:00Z", i + 1))?;
        chain.add_block(block)?;
    }
    Ok(chain)
}

#[test]
fn test_reference_scenario_is_stable() {
    for _ in 0..3 {
        let hash = calculate_hash(0, GENESIS_TS, 60, "", FieldEncoding::Decimal);
        assert_eq!(hash, GENESIS_DECIMAL);
        assert!(is_hex_digest(&hash));
    }
}

#[test]
fn test_linked_block_hash() -> Result<(), Box<dyn std::error::Error>> {
    let genesis = Block::new(0, GENESIS_TS, 60, "", FieldEncoding::Decimal);
    let next = genesis.successor("2024-06-24T00:01:00Z", 72, FieldEncoding::Decimal)?;

    assert_eq!(next.prev_hash(), GENESIS_DECIMAL);
    assert_eq!(
        next.hash(),
        "909455f8454540239213c5731aa7824f5acd4bdec1ccd4ee3b7aef0912cc99e7"
    );
    Ok(())
}

#[test]
fn test_built_chain_validates_under_both_encodings() -> Result<(), Box<dyn std::error::Error>> {
    for encoding in [FieldEncoding::Decimal, FieldEncoding::CodePoint] {
        let chain = build_chain(&[72, 75, 300, -1, 68], encoding)?;
        assert_eq!(chain.len(), 6);
        chain.validate()?;
        validate_chain(chain.blocks(), encoding)?;
    }
    Ok(())
}

#[test]
fn test_encodings_are_not_interchangeable() -> Result<(), Box<dyn std::error::Error>> {
    let chain = build_chain(&[72, 75], FieldEncoding::Decimal)?;
    let err = validate_chain(chain.blocks(), FieldEncoding::CodePoint).unwrap_err();
    assert!(matches!(err, ChainError::InvalidHash { index: 1, .. }));
    Ok(())
}

#[test]
fn test_tampered_reading_is_detected() -> Result<(), Box<dyn std::error::Error>> {
    let chain = build_chain(&[72, 75, 80], FieldEncoding::Decimal)?;
    let json = chain.to_json()?;
    let tampered = json.replace("\"BPM\": 75", "\"BPM\": 180");
    assert_ne!(json, tampered);

    let err = Blockchain::from_json(&tampered, FieldEncoding::Decimal).unwrap_err();
    assert!(matches!(err, ChainError::InvalidHash { index: 2, .. }));
    Ok(())
}

#[test]
fn test_legacy_export_is_accepted() -> Result<(), Box<dyn std::error::Error>> {
    // Shape written by the original program: genesis without a computed hash,
    // integers hashed as code points.
    let block1_hash = calculate_hash(1, "2024-06-24T00:01:00Z", 72, "", FieldEncoding::CodePoint);
    let json = format!(
        r#"[
            {{"Index":0,"Timestamp":"{GENESIS_TS}","BPM":0,"Hash":"","PrevHash":""}},
            {{"Index":1,"Timestamp":"2024-06-24T00:01:00Z","BPM":72,"Hash":"{block1_hash}","PrevHash":""}}
        ]"#
    );

    let mut chain = Blockchain::from_json(&json, FieldEncoding::CodePoint)?;
    let appended = chain.append(74)?;
    assert_eq!(appended.prev_hash(), block1_hash);
    chain.validate()?;
    Ok(())
}

#[test]
fn test_longest_valid_chain_wins() -> Result<(), Box<dyn std::error::Error>> {
    let mut local = build_chain(&[72], FieldEncoding::Decimal)?;
    let remote = build_chain(&[60, 61, 62], FieldEncoding::Decimal)?;

    assert!(!local.replace_chain(local.blocks()[..1].to_vec())?);
    assert!(local.replace_chain(remote.blocks().to_vec())?);
    assert_eq!(local.tip(), remote.tip());

    let mut forged = build_chain(&[60, 61, 62, 63], FieldEncoding::Decimal)?.into_blocks();
    forged.swap(2, 3);
    assert!(local.replace_chain(forged).is_err());
    assert_eq!(local.len(), 4);
    Ok(())
}

#[test]
fn test_tampered_genesis_of_code_point_chain_is_detected() -> Result<(), Box<dyn std::error::Error>> {
    let chain = build_chain(&[72], FieldEncoding::CodePoint)?;
    let json = chain.to_json()?;
    let tampered = json.replacen("\"BPM\": 0", "\"BPM\": 199", 1);
    assert_ne!(json, tampered);

    let err = Blockchain::from_json(&tampered, FieldEncoding::CodePoint).unwrap_err();
    assert!(matches!(err, ChainError::InvalidHash { index: 0, .. }));
    Ok(())
}

#[test]
fn test_max_index_mid_chain_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let genesis = Block::genesis(GENESIS_TS, FieldEncoding::Decimal);
    let json = format!(
        r#"[
            {genesis},
            {{"Index":{max},"Timestamp":"t1","BPM":70,"Hash":"{h}","PrevHash":"{g}"}},
            {{"Index":0,"Timestamp":"t2","BPM":71,"Hash":"{h}","PrevHash":"{h}"}}
        ]"#,
        genesis = serde_json::to_string(&genesis)?,
        max = u64::MAX,
        g = genesis.hash(),
        h = GENESIS_DECIMAL,
    );

    let err = Blockchain::from_json(&json, FieldEncoding::Decimal).unwrap_err();
    assert_eq!(err, ChainError::InvalidIndex { expected: 1, found: u64::MAX });
    Ok(())
}
