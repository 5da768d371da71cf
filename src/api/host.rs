//! The verifier role: issues the challenge `(s, B)` and checks the client's
//! proof before releasing its own.

use log::debug;
use zeroize::Zeroize;

use crate::big_number::Zero;
use crate::config::Srp6Config;
use crate::primitives::*;
use crate::Result;
use crate::Srp6Error;

/// The server's ephemeral pair `(B, b)`.
///
/// Depends only on the stored verifier `v`, so it can be precomputed and
/// reused across authentication attempts of the same user. Reuse is
/// sequential only; nothing synchronises concurrent sessions over one pair.
/// The secret `b` never leaves this struct and is zeroised on drop.
#[allow(non_snake_case)]
#[derive(Debug)]
pub struct KeyPair {
    B: PublicKey,
    b: PrivateKey,
}

impl KeyPair {
    /// draws a fresh `b` and computes `B = (kv + g^b) % N`
    pub fn generate(config: &Srp6Config, verifier: &PasswordVerifier) -> Self {
        let b = generate_private_key_b();

        let B = calculate_pubkey_B(
            config.hash(),
            config.padding(),
            config.group(),
            verifier,
            &b,
        );

        Self { B, b }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.B
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.b.zeroize();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostState {
    ChallengeIssued,
    Authenticated,
    Failed,
}

/// One authentication attempt, seen from the server.
///
/// Construction consumes the client's `(I, A)` and the stored `(s, v)`,
/// issues the challenge and derives every transcript value up front;
/// [`verify_client_proof`][`ServerSession::verify_client_proof`] then decides
/// the attempt. A failed session is terminal.
#[allow(non_snake_case)]
#[derive(Debug)]
pub struct ServerSession {
    config: Srp6Config,
    username: Username,
    K: StrongSessionKey,
    M: Proof,
    M2: StrongProof,
    state: HostState,
}

impl ServerSession {
    /// Opens a session for one authentication attempt and returns it together
    /// with the challenge to send back.
    ///
    /// When `keys` is `None` a fresh [`KeyPair`] is generated from `v`.
    /// Fails with [`Srp6Error::InvalidPublicKey`] if `A % N == 0` and with
    /// [`Srp6Error::KeyLengthMismatch`] if `A` is wider than `N`; no session
    /// exists on failure.
    #[allow(non_snake_case)]
    pub fn new(
        config: &Srp6Config,
        username: UsernameRef,
        salt: &Salt,
        verifier: &PasswordVerifier,
        user_publickey: &PublicKey,
        keys: Option<&KeyPair>,
    ) -> Result<(Self, ServerHandshake)> {
        let group = config.group();
        let n_len = group.modulus_length();

        if user_publickey.num_bytes() > n_len {
            return Err(Srp6Error::KeyLengthMismatch {
                given: user_publickey.num_bytes(),
                expected: n_len,
            });
        }
        // SRP-6a safety check, rejects A chosen to force S = 0
        if (user_publickey % group.modulus()).is_zero() {
            return Err(Srp6Error::InvalidPublicKey(user_publickey.clone()));
        }

        let fresh;
        let keys = match keys {
            Some(keys) => keys,
            None => {
                fresh = KeyPair::generate(config, verifier);
                &fresh
            }
        };
        debug!("B = {:?}", &keys.B);

        let u = calculate_u(
            config.hash(),
            config.padding(),
            n_len,
            user_publickey,
            &keys.B,
        );

        let mut S = calculate_session_key_S_for_host(
            group.modulus(),
            user_publickey,
            &keys.b,
            verifier,
            &u,
        )?;
        let K = calculate_session_key_hash_K(config.hash(), &S);
        S.zeroize();

        let M = calculate_proof_M(
            config.hash(),
            config.padding(),
            group,
            username,
            salt,
            user_publickey,
            &keys.B,
            &K,
        );
        let M2 = calculate_strong_proof_M2(
            config.hash(),
            config.padding(),
            n_len,
            user_publickey,
            &M,
            &K,
        );

        let session = Self {
            config: config.clone(),
            username: username.to_owned(),
            K,
            M,
            M2,
            state: HostState::ChallengeIssued,
        };
        let handshake = ServerHandshake {
            salt: salt.clone(),
            server_publickey: keys.B.clone(),
        };

        Ok((session, handshake))
    }

    /// Checks the client's proof `M1` in constant time.
    ///
    /// On a match the strong proof `M2` is released for the client; on a
    /// mismatch the session fails terminally and `M2` stays hidden.
    pub fn verify_client_proof(&mut self, users_proof: &Proof) -> Result<StrongProof> {
        if self.state != HostState::ChallengeIssued {
            return Err(Srp6Error::InvalidSessionState);
        }

        if proofs_match(&self.M, users_proof) {
            self.state = HostState::Authenticated;
            Ok(self.M2.clone())
        } else {
            self.state = HostState::Failed;
            Err(Srp6Error::InvalidProof(users_proof.clone()))
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == HostState::Authenticated
    }

    pub fn username(&self) -> UsernameRef {
        &self.username
    }

    /// the session key `K`, hidden once the session has failed
    pub fn session_key(&self) -> Option<&[u8]> {
        match self.state {
            HostState::Failed => None,
            _ => Some(&self.K),
        }
    }

    pub fn session_key_length(&self) -> usize {
        self.config.session_key_length()
    }
}

impl Drop for ServerSession {
    fn drop(&mut self) {
        self.K.zeroize();
        self.M.zeroize();
        self.M2.zeroize();
    }
}
