use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt::{Debug, Display, Formatter};
use thiserror::Error;
use zeroize::Zeroize;

/// also exporting the trait here
pub use num_traits::Zero;
pub use std::ops::{Add, Mul, Rem, Sub};

/// [`BigNumber`] wraps an unsigned big integer the way the protocol needs it:
/// non-negative, big-endian on the wire, and with modular arithmetic helpers.
#[derive(PartialEq, Clone, PartialOrd, Serialize, Deserialize)]
pub struct BigNumber(BigUint);

#[derive(Error, Debug)]
pub enum BigNumberError {
    #[error("Invalid hex string.")]
    InvalidHexStr,
}

/// new empty unsigned big number
impl Default for BigNumber {
    fn default() -> Self {
        Self(BigUint::new(vec![]))
    }
}

impl BigNumber {
    /// new random initialized big number, drawn from the process DRBG
    pub fn new_rand(n_bytes: usize) -> Self {
        crate::rng::random_number(n_bytes)
    }

    /// [`raw`] is expected to be big endian
    pub fn from_bytes_be(raw: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(raw))
    }

    /// from a hex string, hex strings are always big endian:
    /// High
    ///    -> Low
    ///  "123acab"
    pub fn from_hex_str_be(str: &str) -> std::result::Result<Self, BigNumberError> {
        let str = if str.len() % 2 != 0 {
            format!("{:0>len$}", str, len = (str.len() / 2 + 1) * 2)
        } else {
            str.to_owned()
        };

        Ok(Self::from_bytes_be(
            hex::decode(str)
                .map_err(|_| BigNumberError::InvalidHexStr)?
                .as_slice(),
        ))
    }

    pub fn modpow(&self, exponent: &Self, modulo: &Self) -> Self {
        self.0.modpow(&exponent.0, &modulo.0).into()
    }

    pub fn num_bytes(&self) -> usize {
        (self.0.bits() as usize + 7) / 8
    }

    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// big-endian bytes, unpadded: exactly `num_bytes()` octets.
    /// Zero encodes as the empty string, matching `mbedtls_mpi_size(0) == 0`.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        if self.0.is_zero() {
            Vec::new()
        } else {
            self.0.to_bytes_be()
        }
    }

    /// big-endian bytes, left-padded with zeros to `len` octets.
    /// A value wider than `len` is returned unpadded.
    pub fn to_bytes_be_padded(&self, len: usize) -> Vec<u8> {
        let bytes = self.to_bytes_be();
        if bytes.len() >= len {
            return bytes;
        }
        let mut r = vec![0_u8; len];
        r[len - bytes.len()..].copy_from_slice(&bytes);

        r
    }
}

#[test]
fn test_mod_exp() {
    let a = BigNumber::from_hex_str_be("6").unwrap();
    let p = BigNumber::from_hex_str_be("3").unwrap();
    let m = BigNumber::from_hex_str_be("7").unwrap();
    let r = a.modpow(&p, &m);

    assert_eq!(&r, &BigNumber::from(6), "{} is not 6", &r);
}

impl Debug for BigNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BigNumber(\"{}\")", self)
    }
}

impl Zeroize for BigNumber {
    /// resets the value to zero; the released limbs cannot be scrubbed
    /// through the [`BigUint`] API
    fn zeroize(&mut self) {
        self.0.set_zero();
    }
}

// region from traits
/// from a [`n`] basic u32
impl From<u32> for BigNumber {
    fn from(n: u32) -> Self {
        Self(BigUint::from(n))
    }
}

impl From<BigUint> for BigNumber {
    fn from(a: BigUint) -> Self {
        Self(a)
    }
}

/// digests enter the transcript as big-endian integers
impl From<&[u8]> for BigNumber {
    fn from(somewhere: &[u8]) -> Self {
        Self::from_bytes_be(somewhere)
    }
}

impl From<&BigNumber> for String {
    fn from(x: &BigNumber) -> Self {
        x.0.to_str_radix(16).to_uppercase()
    }
}

impl From<BigNumber> for String {
    fn from(x: BigNumber) -> Self {
        (&x).into()
    }
}

impl TryFrom<&str> for BigNumber {
    type Error = BigNumberError;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        Self::from_hex_str_be(value)
    }
}

impl TryFrom<String> for BigNumber {
    type Error = BigNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex_str_be(value.as_str())
    }
}

#[test]
fn should_try_from_string() {
    use std::convert::TryInto;

    let s = "ab11cd".to_string();
    let x: BigNumber = s.try_into().unwrap();
    assert_eq!(x.to_bytes_be(), &[0xab, 0x11, 0xcd]);
}

#[test]
fn should_from_bytes() {
    let x = BigNumber::from_bytes_be(&[0x00, 0x11, 0xcd]);
    assert_eq!(x.to_bytes_be(), &[0x11, 0xcd], "leading zeros are dropped");
}

#[test]
fn should_encode_zero_as_empty() {
    assert!(BigNumber::default().to_bytes_be().is_empty());
    assert_eq!(BigNumber::default().to_bytes_be_padded(4), &[0, 0, 0, 0]);
}

#[test]
fn should_pad_left() {
    let x = BigNumber::from_bytes_be(&[0x11, 0xcd]);
    assert_eq!(x.to_bytes_be_padded(3), &[0, 0x11, 0xcd]);
}

#[test]
fn should_random_initialize() {
    let x = BigNumber::new_rand(10);
    assert_ne!(x, BigNumber::default());
}

#[test]
fn should_work_with_odd_hex_digit_count() {
    assert_eq!(BigNumber::from_hex_str_be("6").unwrap().to_string(), "6");
}
// endregion

// region modulo
impl Rem for &BigNumber {
    type Output = BigNumber;

    fn rem(self, rhs: &BigNumber) -> Self::Output {
        (&self.0).rem(&rhs.0).into()
    }
}
impl Rem for BigNumber {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        (&self).rem(&rhs)
    }
}
#[test]
fn should_modulo() {
    let exp = BigNumber::from(7 % 6);
    assert_eq!(BigNumber::from(7) % BigNumber::from(6), exp);
}
// endregion

// region mul, add, sub
impl Mul for BigNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        (self.0 * rhs.0).into()
    }
}

impl Mul for &BigNumber {
    type Output = BigNumber;

    fn mul(self, rhs: Self) -> Self::Output {
        (&self.0 * &rhs.0).into()
    }
}

impl Add for BigNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.0.add(rhs.0).into()
    }
}
impl<'b> Add<&'b BigNumber> for &BigNumber {
    type Output = BigNumber;

    fn add(self, rhs: &'b BigNumber) -> Self::Output {
        (&self.0).add(&rhs.0).into()
    }
}

impl Sub for BigNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.0.sub(rhs.0).into()
    }
}

impl<'b> Sub<&'b BigNumber> for &BigNumber {
    type Output = BigNumber;

    fn sub(self, rhs: &'b BigNumber) -> Self::Output {
        (&self.0).sub(&rhs.0).into()
    }
}
#[test]
fn should_subtract_refs() {
    let (a, b) = (BigNumber::from(6), BigNumber::from(6));
    assert_eq!(&a - &b, BigNumber::from(0));
}
// endregion

impl Display for BigNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let x: String = self.into();
        write!(f, "{}", x)
    }
}

#[test]
fn test_into_string_and_display() {
    let x = BigNumber::from_hex_str_be(
        "3E9D557B7899AC2A8DEC8D0046FB310A42A233BD1DF0244B574AB946A22A4A18",
    )
    .unwrap();
    let s: String = x.into();
    assert_eq!(
        s,
        "3E9D557B7899AC2A8DEC8D0046FB310A42A233BD1DF0244B574AB946A22A4A18"
    );
}

impl Zero for BigNumber {
    fn zero() -> Self {
        BigUint::zero().into()
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

#[test]
fn should_zeroize_to_zero() {
    let mut x = BigNumber::from(42);
    x.zeroize();
    assert!(x.is_zero());
}
