/*!
This module defines a list of all primitive types and functions
needed to express the meaning of certain variables better.

For instance in [RFC2945] the big prime number that acts
as the modulus in every mathematical power operation is called `N`.

In order to increase readability the type of `N` is
an alias to [`BigNumber`] that aims to express the meaning,
so [`PrimeModulus`] is same as `N` which is a [`BigNumber`].

This scheme is applied for all variables used in the calculus.

Every hash input built here follows one byte-level discipline: integers are
big-endian, leading zeros stripped, unless the config opted into the strict
RFC 5054 fixed-width encoding (see [`PadMode`]). The ordering of the inputs
is the wire contract; do not reorder.

[RFC2945]: https://datatracker.ietf.org/doc/html/rfc2945
*/
use log::debug;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::big_number::{BigNumber, Zero};
use crate::config::PadMode;
use crate::groups::Group;
use crate::hash::{hash_all, Hash, HashKind, Hasher};
#[cfg(feature = "norand")]
use crate::protocol_details::testdata;
use crate::{Result, Srp6Error};

/// byte width of the random field the ephemeral secrets `a` and `b` are
/// drawn from, for every group size
pub(crate) const EPHEMERAL_KEY_LENGTH: usize = 256;

/// salt bytes drawn when the caller does not pick a length
pub(crate) const DEFAULT_SALT_LENGTH: usize = 32;

/// Refers to a large safe prime called `N` (`N = 2q+1`, where `q` is prime)
#[doc(alias = "N")]
pub type PrimeModulus = BigNumber;

/// Refers to the modulus generator `g`
#[doc(alias = "g")]
pub type Generator = BigNumber;

/// Refers to a User's salt called `s`
#[doc(alias = "s")]
pub type Salt = BigNumber;

/// Refers to a Public shared key called A (user), B (server)
#[doc(alias("A", "B"))]
pub type PublicKey = BigNumber;

/// Refers to a private secret random number a (user), b (server)
#[doc(alias("a", "b"))]
pub type PrivateKey = BigNumber;

/// Password Verifier is the users secret on the server side
#[doc(alias = "v")]
pub type PasswordVerifier = BigNumber;

/// Refers to a multiplier parameter `k` (k = H(N, g) in SRP-6a, k = 3 for legacy SRP-6)
#[doc(alias = "k")]
pub type MultiplierParameter = BigNumber;

/// Refers to the SessionKey `S`, the shared secret integer
#[doc(alias = "S")]
pub type SessionKey = BigNumber;
/// Refers to the StrongSessionKey `K = H(S)`, raw digest bytes
#[doc(alias = "K")]
pub type StrongSessionKey = Vec<u8>;

/// Refers to `M` and `M1`, the proof the client shows first
#[doc(alias("M", "M1"))]
pub type Proof = Vec<u8>;
/// Refers to `M2` the server's answering proof
#[doc(alias = "M2")]
pub type StrongProof = Vec<u8>;

/// Username `I` as [`String`]
#[doc(alias = "I")]
pub type Username = String;
/// Username reference `I` as [`&str`]
pub type UsernameRef<'a> = &'a str;
/// Clear text password `p` as [`str`]
#[doc(alias = "p")]
pub type ClearTextPassword = str;

/// User details composes [`Username`], [`Salt`] and [`PasswordVerifier`] in one struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetails {
    pub username: Username,
    pub salt: Salt,
    pub verifier: PasswordVerifier,
}

/// what the client sends to open an authentication attempt: `(I, A)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserHandshake {
    pub username: Username,
    pub user_publickey: PublicKey,
}

/// the server's challenge: `(s, B)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerHandshake {
    pub salt: Salt,
    pub server_publickey: PublicKey,
}

/// integer encoding for hash inputs, honoring the configured padding mode
fn encode(n: &BigNumber, pad: PadMode, n_len: usize) -> Vec<u8> {
    match pad {
        PadMode::Unpadded => n.to_bytes_be(),
        PadMode::Rfc5054 => n.to_bytes_be_padded(n_len),
    }
}

/// `H(n)` as raw digest bytes (key material, never reinterpreted)
fn hash_num(kind: HashKind, n: &BigNumber, pad: PadMode, n_len: usize) -> Hash {
    hash_all(kind, encode(n, pad, n_len))
}

/// host version of a session key for a given user
/// S: is the session key of a user
/// u: is the hash of user and server pub keys
///
/// u = H(A, B)
/// S = (Av^u) ^ b
#[allow(non_snake_case)]
pub(crate) fn calculate_session_key_S_for_host(
    N: &PrimeModulus,
    A: &PublicKey,
    b: &PrivateKey,
    v: &PasswordVerifier,
    u: &BigNumber,
) -> Result<SessionKey> {
    // safeguard A % N == 0 should be checked
    if (A % N).is_zero() {
        return Err(Srp6Error::InvalidPublicKey(A.clone()));
    }

    let base = A * &v.modpow(u, N);
    let S: SessionKey = base.modpow(b, N);

    Ok(S)
}

/// client version of the session key calculation, depends on
/// - the users private key `x`
/// - the servers [`PublicKey`] `B`
/// - formula: `S = (B - (k * g^x)) ^ (a + (u * x)) % N`
///
/// The difference `B - k*g^x` is computed in `[0, N)`; the exponent is left
/// unreduced (exponents live modulo `N - 1`, so folding it by `N` would
/// desynchronise the two sides whenever `a + u*x >= N`).
#[allow(non_snake_case)]
#[allow(clippy::many_single_char_names)]
#[allow(clippy::too_many_arguments)]
pub(crate) fn calculate_session_key_S_for_client(
    hash: HashKind,
    pad: PadMode,
    group: &Group,
    B: &PublicKey,
    a: &PrivateKey,
    x: &PrivateKey,
    u: &BigNumber,
) -> Result<SessionKey> {
    let N = group.modulus();
    let g = group.generator();

    // safeguard B % N == 0
    if (B % N).is_zero() {
        return Err(Srp6Error::InvalidPublicKey(B.clone()));
    }

    let k = calculate_k(hash, pad, group);
    let exp: BigNumber = a + &(u * x);
    let g_pow_x = g.modpow(x, N);
    let to_sub = &(&k * &g_pow_x) % N;
    let base = &(&(&(B % N) + N) - &to_sub) % N;
    let S = base.modpow(&exp, N);

    Ok(S)
}

/// the session key `K` both sides hold after a successful exchange,
/// formula: `K = H(S)`
#[allow(non_snake_case)]
pub(crate) fn calculate_session_key_hash_K(hash: HashKind, S: &SessionKey) -> StrongSessionKey {
    hash_all(hash, S.to_bytes_be())
}

/// the client proof, shown to the server first
/// formula: `M = H(H(N) xor H(g) | H(I) | s | A | B | K)`
#[allow(non_snake_case)]
#[allow(clippy::too_many_arguments)]
pub(crate) fn calculate_proof_M(
    hash: HashKind,
    pad: PadMode,
    group: &Group,
    I: UsernameRef,
    s: &Salt,
    A: &PublicKey,
    B: &PublicKey,
    K: &StrongSessionKey,
) -> Proof {
    let n_len = group.modulus_length();
    let xor_hash = calculate_hash_N_xor_g(hash, pad, group);
    let username_hash = hash_all(hash, I.as_bytes());

    let M: Proof = Hasher::new(hash)
        .chain(&xor_hash)
        .chain(&username_hash)
        .chain(s.to_bytes_be())
        .chain(encode(A, pad, n_len))
        .chain(encode(B, pad, n_len))
        .chain(K)
        .finalize();

    debug!("M = {:?}", hex::encode(&M));

    M
}

/// the server's answering proof
/// formula: `M2 = H(A | M | K)`
#[allow(non_snake_case)]
pub(crate) fn calculate_strong_proof_M2(
    hash: HashKind,
    pad: PadMode,
    n_len: usize,
    A: &PublicKey,
    M: &Proof,
    K: &StrongSessionKey,
) -> StrongProof {
    Hasher::new(hash)
        .chain(encode(A, pad, n_len))
        .chain(M)
        .chain(K)
        .finalize()
}

/// here we hash g and xor it with the hash of N
///
/// ```plain
/// M = H(H(N) xor H(g), H(I), s, A, B, K)
///       `````````````
///                    // this portion is calculated here
/// ```
#[allow(non_snake_case)]
fn calculate_hash_N_xor_g(hash: HashKind, pad: PadMode, group: &Group) -> Hash {
    let n_len = group.modulus_length();
    let mut h = hash_num(hash, group.modulus(), pad, n_len);
    let h_g = hash_num(hash, group.generator(), pad, n_len);
    for (v, g_byte) in h.iter_mut().zip(h_g.iter()) {
        *v ^= g_byte;
    }

    h
}

/// here we calculate the `PasswordVerifier` called `v` based on `x`
/// **Note**: something that only needs to be done on user pw change, or user creation
/// `x`:  Private key (derived from p and s)
/// `v`:  Password verifier
/// `g`:  A generator modulo N
/// `N`:  A large safe prime (N = 2q+1, where q is prime)
/// formula: `v = g^x % N`
#[allow(non_snake_case)]
pub(crate) fn calculate_password_verifier_v(
    N: &PrimeModulus,
    g: &Generator,
    x: &PrivateKey,
) -> PasswordVerifier {
    g.modpow(x, N)
}

/// `u` is the hash of host's and client's [`PublicKey`],
/// reinterpreted as an integer
/// formula: `u = H(A | B)`
#[allow(non_snake_case)]
pub(crate) fn calculate_u(
    hash: HashKind,
    pad: PadMode,
    n_len: usize,
    A: &PublicKey,
    B: &PublicKey,
) -> BigNumber {
    let digest = Hasher::new(hash)
        .chain(encode(A, pad, n_len))
        .chain(encode(B, pad, n_len))
        .finalize();
    let u = BigNumber::from(digest.as_slice());
    debug!("u = {:?}", &u);

    u
}

/// `A` is the [`PublicKey`] of the client
/// formula: `A = g^a % N`
#[allow(non_snake_case)]
pub(crate) fn calculate_pubkey_A(N: &PrimeModulus, g: &Generator, a: &PrivateKey) -> PublicKey {
    let A = g.modpow(a, N);
    debug!("A = {:?}", &A);

    A
}

/// [`PublicKey`][B] is the hosts public key
/// formula: `B = (kv + g^b) % N`
#[allow(non_snake_case)]
pub(crate) fn calculate_pubkey_B(
    hash: HashKind,
    pad: PadMode,
    group: &Group,
    v: &PasswordVerifier,
    b: &PrivateKey,
) -> PublicKey {
    let N = group.modulus();
    let g_pow_b = group.generator().modpow(b, N);
    let k = calculate_k(hash, pad, group);
    let B = &(&(&k * v) + &g_pow_b) % N;

    debug!("B = {:?}", &B);

    B
}

/// `x` is the users private key (only they know),
/// reinterpreted as an integer
///
/// I:  Username
/// p:  Cleartext Password
/// s:  User's salt
/// ph = H(I | ':' | p)         (':' is a string literal)
/// x  = H(s | ph)              (s is chosen randomly)
#[allow(non_snake_case)]
pub(crate) fn calculate_private_key_x(
    hash: HashKind,
    I: UsernameRef,
    p: &[u8],
    s: &Salt,
) -> PrivateKey {
    let ph = calculate_p_hash(hash, I, p);
    let digest = Hasher::new(hash).chain(s.to_bytes_be()).chain(&ph).finalize();

    BigNumber::from(digest.as_slice())
}

/// hashes the user and the password (used for client private key `x`)
#[allow(non_snake_case)]
pub(crate) fn calculate_p_hash(hash: HashKind, I: UsernameRef, p: &[u8]) -> Hash {
    Hasher::new(hash)
        .chain(I.as_bytes())
        .chain(b":")
        .chain(p)
        .finalize()
}

/// `k = H(N | g)` (k = 3 for legacy SRP-6),
/// reinterpreted as an integer
#[allow(non_snake_case)]
pub(crate) fn calculate_k(
    hash: HashKind,
    pad: PadMode,
    group: &Group,
) -> MultiplierParameter {
    let n_len = group.modulus_length();
    let digest = Hasher::new(hash)
        .chain(encode(group.modulus(), pad, n_len))
        .chain(encode(group.generator(), pad, n_len))
        .finalize();

    BigNumber::from(digest.as_slice())
}

/// length-gated constant-time digest comparison for `M1` and `M2`
pub(crate) fn proofs_match(ours: &[u8], theirs: &[u8]) -> bool {
    if ours.len() != theirs.len() {
        return false;
    }

    ours.ct_eq(theirs).into()
}

/// [`PrivateKey`] `a` is in fact just a big (positive) random number
pub(crate) fn generate_private_key_a() -> PrivateKey {
    #[cfg(not(feature = "norand"))]
    return PrivateKey::new_rand(EPHEMERAL_KEY_LENGTH);
    #[cfg(feature = "norand")]
    PrivateKey::from_bytes_be(&testdata::A_PRIVATE)
}

/// [`PrivateKey`] `b` is in fact just a big (positive) random number
pub(crate) fn generate_private_key_b() -> PrivateKey {
    #[cfg(not(feature = "norand"))]
    return PrivateKey::new_rand(EPHEMERAL_KEY_LENGTH);
    #[cfg(feature = "norand")]
    PrivateKey::from_bytes_be(&testdata::B_PRIVATE)
}

/// [`Salt`] `s` is a random number
#[allow(unused_variables)]
pub(crate) fn generate_salt(salt_length: usize) -> Salt {
    #[cfg(not(feature = "norand"))]
    return Salt::new_rand(salt_length);
    #[cfg(feature = "norand")]
    Salt::from_bytes_be(&testdata::SALT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::GroupId;
    use crate::protocol_details::testdata;

    fn group_1024() -> Group {
        Group::standard(GroupId::N1024)
    }

    /// k = H(N | PAD(g)), RFC 5054 appendix B
    #[test]
    fn should_match_official_multiplier_in_strict_mode() {
        let k = calculate_k(HashKind::Sha1, PadMode::Rfc5054, &group_1024());
        assert_eq!(k, BigNumber::from_bytes_be(&testdata::K_MULTIPLIER));

        // the unpadded encoding of g = 2 is a single byte, so the compatibility
        // mode hashes a different transcript
        let k = calculate_k(HashKind::Sha1, PadMode::Unpadded, &group_1024());
        assert_ne!(k, BigNumber::from_bytes_be(&testdata::K_MULTIPLIER));
    }

    /// x = H(s | H(I ":" p)), RFC 5054 appendix B; the salt is an octet
    /// string, so both padding modes agree
    #[test]
    fn should_match_official_private_key_x() {
        let s = Salt::from_bytes_be(&testdata::SALT);
        let x = calculate_private_key_x(
            HashKind::Sha1,
            testdata::USERNAME,
            testdata::PASSWORD.as_bytes(),
            &s,
        );
        assert_eq!(x, BigNumber::from_bytes_be(&testdata::X));
    }

    /// A = g^a % N, RFC 5054 appendix B (pure arithmetic, mode-independent)
    #[test]
    fn should_match_official_pubkey_a() {
        let group = group_1024();
        let a = PrivateKey::from_bytes_be(&testdata::A_PRIVATE);
        let big_a = calculate_pubkey_A(group.modulus(), group.generator(), &a);
        assert_eq!(big_a, PublicKey::from_bytes_be(&testdata::A_PUBLIC));
    }

    /// B = (kv + g^b) % N, RFC 5054 appendix B (k is the padded one)
    #[test]
    fn should_match_official_pubkey_b() {
        let group = group_1024();
        let v = PasswordVerifier::from_bytes_be(&testdata::VERIFIER);
        let b = PrivateKey::from_bytes_be(&testdata::B_PRIVATE);
        let big_b = calculate_pubkey_B(HashKind::Sha1, PadMode::Rfc5054, &group, &v, &b);
        assert_eq!(big_b, PublicKey::from_bytes_be(&testdata::B_PUBLIC));
    }

    /// u = H(A | B), RFC 5054 appendix B; both vectors are full width so the
    /// padding mode does not matter here
    #[test]
    fn should_match_official_scrambler_u() {
        let group = group_1024();
        let big_a = PublicKey::from_bytes_be(&testdata::A_PUBLIC);
        let big_b = PublicKey::from_bytes_be(&testdata::B_PUBLIC);
        for pad in [PadMode::Unpadded, PadMode::Rfc5054] {
            let u = calculate_u(HashKind::Sha1, pad, group.modulus_length(), &big_a, &big_b);
            assert_eq!(u, BigNumber::from_bytes_be(&testdata::U));
        }
    }

    /// both sides must land on the official premaster secret
    #[test]
    fn should_match_official_premaster_secret_on_both_sides() {
        let group = group_1024();
        let big_a = PublicKey::from_bytes_be(&testdata::A_PUBLIC);
        let big_b = PublicKey::from_bytes_be(&testdata::B_PUBLIC);
        let u = BigNumber::from_bytes_be(&testdata::U);
        let expected = SessionKey::from_bytes_be(&testdata::SECRET);

        let host_s = calculate_session_key_S_for_host(
            group.modulus(),
            &big_a,
            &PrivateKey::from_bytes_be(&testdata::B_PRIVATE),
            &PasswordVerifier::from_bytes_be(&testdata::VERIFIER),
            &u,
        )
        .unwrap();
        assert_eq!(host_s, expected, "host S nok");

        let client_s = calculate_session_key_S_for_client(
            HashKind::Sha1,
            PadMode::Rfc5054,
            &group,
            &big_b,
            &PrivateKey::from_bytes_be(&testdata::A_PRIVATE),
            &PrivateKey::from_bytes_be(&testdata::X),
            &u,
        )
        .unwrap();
        assert_eq!(client_s, expected, "client S nok");
    }

    /// the verifier derived from the official x must be the official v
    #[test]
    fn should_match_official_verifier() {
        let group = group_1024();
        let x = PrivateKey::from_bytes_be(&testdata::X);
        let v = calculate_password_verifier_v(group.modulus(), group.generator(), &x);
        assert_eq!(v, PasswordVerifier::from_bytes_be(&testdata::VERIFIER));
    }

    #[test]
    fn zero_public_keys_are_rejected() {
        let group = group_1024();
        let n_times_2 = group.modulus() + group.modulus();
        let u = BigNumber::from(1);

        for bad in [BigNumber::default(), group.modulus().clone(), n_times_2] {
            assert!(matches!(
                calculate_session_key_S_for_host(
                    group.modulus(),
                    &bad,
                    &PrivateKey::from(2),
                    &PasswordVerifier::from(2),
                    &u,
                ),
                Err(Srp6Error::InvalidPublicKey(_))
            ));
            assert!(matches!(
                calculate_session_key_S_for_client(
                    HashKind::Sha1,
                    PadMode::Unpadded,
                    &group,
                    &bad,
                    &PrivateKey::from(2),
                    &PrivateKey::from(2),
                    &u,
                ),
                Err(Srp6Error::InvalidPublicKey(_))
            ));
        }
    }

    #[test]
    fn proof_comparison_is_length_gated() {
        assert!(proofs_match(b"equal-digest", b"equal-digest"));
        assert!(!proofs_match(b"equal-digest", b"other-digest"));
        assert!(!proofs_match(b"equal-digest", b"equal-diges"));
    }
}
