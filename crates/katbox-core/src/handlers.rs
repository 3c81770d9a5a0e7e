//! Request handlers: wire-argument marshaling around `katbox-crypto`.
//!
//! Each handler checks its operand count, decodes the typed arguments,
//! drives the construction, and returns the reply payloads in catalogue
//! order. Handlers never touch the channel and never decide process fate;
//! they report [`RequestError`] and leave policy to the serve loop.

use katbox_crypto::drbg::HmacDrbg;
use katbox_crypto::kdf::{counter_kdf, hkdf_sha256, FIXED_DATA_SIZE};
use katbox_crypto::random::random_array;
use katbox_crypto::xts::XtsCipher;
use katbox_crypto::XTS_TWEAK_SIZE;

use crate::channel::Reply;
use crate::error::RequestError;

/// PRF identifier accepted by `KDF-counter`.
const KDF_PRF: &[u8] = b"HMAC-SHA2-256";

/// Counter placement accepted by `KDF-counter`.
const KDF_COUNTER_LOCATION: &[u8] = b"before fixed data";

fn expect_operands(
    operation: &'static str,
    expected: usize,
    operands: &[&[u8]],
) -> Result<(), RequestError> {
    if operands.len() != expected {
        return Err(RequestError::WrongOperandCount {
            operation,
            expected,
            actual: operands.len(),
        });
    }
    Ok(())
}

/// Decode a u32 wire argument: exactly 4 bytes, little-endian.
fn parse_u32(operand: &[u8]) -> Result<u32, RequestError> {
    if operand.len() != 4 {
        return Err(RequestError::MalformedLength(operand.len()));
    }
    Ok(u32::from_le_bytes([
        operand[0], operand[1], operand[2], operand[3],
    ]))
}

/// Capability advertisement returned verbatim by `getConfig`: what this
/// backend implements, phrased the way the validation harness expects.
const CAPABILITIES: &str = r#"[
    {
        "algorithm": "KDF",
        "revision": "1.0",
        "capabilities": [{
            "kdfMode": "counter",
            "macMode": ["HMAC-SHA2-256"],
            "supportedLengths": [{"min": 8, "max": 4096, "increment": 8}],
            "fixedDataOrder": ["before fixed data"],
            "counterLength": [32]
        }]
    },
    {
        "algorithm": "ACVP-AES-XTS",
        "revision": "1.0",
        "direction": ["encrypt", "decrypt"],
        "keyLen": [128, 256],
        "payloadLen": [1024],
        "tweakMode": ["number"]
    },
    {
        "algorithm": "KAS-KDF",
        "mode": "TwoStep",
        "revision": "Sp800-56Cr2",
        "capabilities": [{
            "macSaltMethods": ["random", "default"],
            "fixedInfoPattern": "uPartyInfo||vPartyInfo",
            "encoding": ["concatenation"],
            "kdfMode": "feedback",
            "macMode": ["HMAC-SHA2-256"],
            "supportedLengths": [{"min": 128, "max": 512, "increment": 64}],
            "fixedDataOrder": ["after fixed data"],
            "counterLength": [8],
            "requiresEmptyIv": true,
            "supportsEmptyIv": true
        }],
        "l": 256,
        "z": [256, 384]
    },
    {
        "algorithm": "hmacDRBG",
        "revision": "1.0",
        "predResistanceEnabled": [false, true],
        "reseedImplemented": true,
        "capabilities": [{
            "mode": "SHA2-256",
            "derFuncEnabled": false,
            "entropyInputLen": [256],
            "nonceLen": [128],
            "persoStringLen": [256],
            "additionalInputLen": [256],
            "returnedBitsLen": 256
        }]
    }
]"#;

/// `getConfig`: the static capability advertisement, no operands.
pub fn get_config(operands: &[&[u8]]) -> Result<Reply, RequestError> {
    expect_operands("getConfig", 0, operands)?;
    Ok(vec![CAPABILITIES.as_bytes().to_vec()])
}

/// `KDF-counter`: SP 800-108 counter-mode derivation.
///
/// The harness may send an empty key to request on-the-fly key generation;
/// the generated key and the per-request fixed data are echoed back so the
/// harness can record them as vector inputs.
pub fn kdf_counter(operands: &[&[u8]]) -> Result<Reply, RequestError> {
    expect_operands("KDF-counter", 5, operands)?;
    let output_bytes = parse_u32(operands[0])?;
    let prf = operands[1];
    let counter_location = operands[2];
    let supplied_key = operands[3];
    let counter_bits = parse_u32(operands[4])?;

    if prf != KDF_PRF {
        return Err(RequestError::UnsupportedParameter {
            what: "PRF",
            value: String::from_utf8_lossy(prf).into_owned(),
        });
    }
    if counter_location != KDF_COUNTER_LOCATION {
        return Err(RequestError::UnsupportedParameter {
            what: "counter location",
            value: String::from_utf8_lossy(counter_location).into_owned(),
        });
    }
    if counter_bits != 32 {
        return Err(RequestError::UnsupportedParameter {
            what: "counter length",
            value: counter_bits.to_string(),
        });
    }

    let key: Vec<u8> = if supplied_key.is_empty() {
        random_array::<32>()?.to_vec()
    } else {
        supplied_key.to_vec()
    };
    let fixed_data: [u8; FIXED_DATA_SIZE] = random_array()?;

    let derived = counter_kdf(&key, &fixed_data, output_bytes)?;
    Ok(vec![key, fixed_data.to_vec(), derived])
}

/// `AES-XTS/encrypt`.
pub fn xts_encrypt(operands: &[&[u8]]) -> Result<Reply, RequestError> {
    xts_transform("AES-XTS/encrypt", operands, false)
}

/// `AES-XTS/decrypt`.
pub fn xts_decrypt(operands: &[&[u8]]) -> Result<Reply, RequestError> {
    xts_transform("AES-XTS/decrypt", operands, true)
}

fn xts_transform(
    operation: &'static str,
    operands: &[&[u8]],
    decrypt: bool,
) -> Result<Reply, RequestError> {
    expect_operands(operation, 3, operands)?;
    let key = operands[0];
    let mut msg = operands[1].to_vec();
    let tweak = operands[2];

    if tweak.len() != XTS_TWEAK_SIZE || tweak[8..] != [0u8; 8] {
        // Only sector-number tweaks are advertised; anything else means the
        // harness configuration does not match this backend.
        return Err(RequestError::InvalidTweak);
    }
    let sector = u64::from_le_bytes([
        tweak[0], tweak[1], tweak[2], tweak[3], tweak[4], tweak[5], tweak[6], tweak[7],
    ]);

    let cipher = XtsCipher::new(key)?;
    if decrypt {
        cipher.decrypt_sector(&mut msg, sector)?;
    } else {
        cipher.encrypt_sector(&mut msg, sector)?;
    }
    Ok(vec![msg])
}

/// `HKDF/SHA2-256`: extract-then-expand to the requested length.
pub fn hkdf(operands: &[&[u8]]) -> Result<Reply, RequestError> {
    expect_operands("HKDF/SHA2-256", 4, operands)?;
    let ikm = operands[0];
    let salt = operands[1];
    let info = operands[2];
    let length = parse_u32(operands[3])?;

    let mut out = vec![0u8; length as usize];
    hkdf_sha256(ikm, salt, info, &mut out)?;
    Ok(vec![out])
}

/// `hmacDRBG-reseed/SHA2-256`: instantiate, one explicit reseed, then two
/// generates with independent additional inputs; the reply is the second
/// generate's output.
pub fn drbg_reseed(operands: &[&[u8]]) -> Result<Reply, RequestError> {
    expect_operands("hmacDRBG-reseed/SHA2-256", 8, operands)?;
    let out_len = parse_u32(operands[0])?;
    let entropy = operands[1];
    let personalization = operands[2];
    let reseed_additional_input = operands[3];
    let reseed_entropy = operands[4];
    let additional_input1 = operands[5];
    let additional_input2 = operands[6];
    let nonce = operands[7];

    let mut out = vec![0u8; out_len as usize];
    let mut drbg = HmacDrbg::new(entropy, nonce, personalization);
    drbg.reseed(reseed_entropy, reseed_additional_input);
    drbg.generate(&mut out, additional_input1);
    drbg.generate(&mut out, additional_input2);
    Ok(vec![out])
}

/// `hmacDRBG-pr/SHA2-256`: prediction resistance, a fresh reseed before
/// every generate; the reply is the second generate's output.
pub fn drbg_prediction_resistance(operands: &[&[u8]]) -> Result<Reply, RequestError> {
    expect_operands("hmacDRBG-pr/SHA2-256", 8, operands)?;
    let out_len = parse_u32(operands[0])?;
    let entropy = operands[1];
    let personalization = operands[2];
    let additional_input1 = operands[3];
    let entropy1 = operands[4];
    let additional_input2 = operands[5];
    let entropy2 = operands[6];
    let nonce = operands[7];

    let mut out = vec![0u8; out_len as usize];
    let mut drbg = HmacDrbg::new(entropy, nonce, personalization);
    drbg.reseed(entropy1, additional_input1);
    drbg.generate(&mut out, b"");
    drbg.reseed(entropy2, additional_input2);
    drbg.generate(&mut out, b"");
    Ok(vec![out])
}
