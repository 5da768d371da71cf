//! The user role: signup secrets, the opening `(I, A)`, the challenge
//! response `M1` and the final check of the server's `M2`.

use log::debug;
use std::fmt::{Debug, Formatter};
use zeroize::{Zeroize, Zeroizing};

use crate::big_number::Zero;
use crate::config::Srp6Config;
use crate::primitives::*;
use crate::Result;
use crate::Srp6Error;

/// creates a new [`Salt`] `s` and [`PasswordVerifier`] `v` for a new user,
/// with a random salt of the conventional 32 bytes
///
/// **Note**: something that only needs to be done on user pw change, or user creation
pub fn generate_user_secrets(
    config: &Srp6Config,
    username: UsernameRef,
    password: &ClearTextPassword,
) -> UserDetails {
    generate_user_secrets_with_salt_len(config, username, password, DEFAULT_SALT_LENGTH)
}

/// like [`generate_user_secrets`] with a caller-chosen salt length in bytes
pub fn generate_user_secrets_with_salt_len(
    config: &Srp6Config,
    username: UsernameRef,
    password: &ClearTextPassword,
    salt_length: usize,
) -> UserDetails {
    let salt = generate_salt(salt_length);
    generate_user_secrets_with_salt(config, username, password, salt)
}

/// like [`generate_user_secrets`] with a caller-supplied salt; the salt must
/// be random per credential, supplying one is meant for interop and tests
pub fn generate_user_secrets_with_salt(
    config: &Srp6Config,
    username: UsernameRef,
    password: &ClearTextPassword,
    salt: Salt,
) -> UserDetails {
    let mut x = calculate_private_key_x(config.hash(), username, password.as_bytes(), &salt);
    let verifier =
        calculate_password_verifier_v(config.group().modulus(), config.group().generator(), &x);
    x.zeroize();

    UserDetails {
        username: username.to_owned(),
        salt,
        verifier,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserState {
    New,
    Started,
    ChallengeProcessed,
    Authenticated,
    Failed,
}

/// One authentication attempt, seen from the client.
///
/// The password is copied into a zeroising buffer at construction and
/// scrubbed when the session drops, together with the secret scalar and the
/// derived key material. A failed session is terminal.
#[allow(non_snake_case)]
pub struct ClientSession {
    config: Srp6Config,
    username: Username,
    password: Zeroizing<Vec<u8>>,
    a: PrivateKey,
    A: PublicKey,
    K: StrongSessionKey,
    M: Proof,
    M2: StrongProof,
    state: UserState,
}

/// secrets stay out of any `{:?}` output
impl Debug for ClientSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSession")
            .field("config", &self.config)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("a", &"<redacted>")
            .field("A", &self.A)
            .field("K", &"<redacted>")
            .field("M", &self.M)
            .field("M2", &"<redacted>")
            .field("state", &self.state)
            .finish()
    }
}

impl ClientSession {
    pub fn new(config: &Srp6Config, username: UsernameRef, password: &ClearTextPassword) -> Self {
        Self {
            config: config.clone(),
            username: username.to_owned(),
            password: Zeroizing::new(password.as_bytes().to_vec()),
            a: PrivateKey::default(),
            A: PublicKey::default(),
            K: StrongSessionKey::default(),
            M: Proof::default(),
            M2: StrongProof::default(),
            state: UserState::New,
        }
    }

    /// Draws the ephemeral secret `a`, computes `A = g^a % N` and returns the
    /// opening handshake `(I, A)`. The degenerate draws `a % N == 0` and
    /// `A == 0` are rejected and redrawn.
    #[allow(non_snake_case)]
    pub fn start_authentication(&mut self) -> Result<UserHandshake> {
        match self.state {
            UserState::New | UserState::Started => {}
            _ => return Err(Srp6Error::InvalidSessionState),
        }

        let N = self.config.group().modulus();
        let g = self.config.group().generator();

        let (a, A) = loop {
            let a = generate_private_key_a();
            if (&a % N).is_zero() {
                continue;
            }
            let A = calculate_pubkey_A(N, g, &a);
            if !A.is_zero() {
                break (a, A);
            }
        };

        self.a = a;
        self.A = A.clone();
        self.state = UserState::Started;

        Ok(UserHandshake {
            username: self.username.clone(),
            user_publickey: A,
        })
    }

    /// Processes the server's challenge `(s, B)` and returns the proof `M1`
    /// to send back.
    ///
    /// Fails terminally with [`Srp6Error::InvalidPublicKey`] if `B % N == 0`
    /// and with [`Srp6Error::ZeroScramblingParameter`] if `u == 0`; no proof
    /// leaves a failed session.
    #[allow(non_snake_case)]
    pub fn process_challenge(&mut self, server_handshake: &ServerHandshake) -> Result<Proof> {
        if self.state != UserState::Started {
            return Err(Srp6Error::InvalidSessionState);
        }

        let group = self.config.group();
        let n_len = group.modulus_length();
        let B = &server_handshake.server_publickey;
        let s = &server_handshake.salt;

        // SRP-6a safety checks
        if (B % group.modulus()).is_zero() {
            self.state = UserState::Failed;
            return Err(Srp6Error::InvalidPublicKey(B.clone()));
        }
        let u = calculate_u(self.config.hash(), self.config.padding(), n_len, &self.A, B);
        if u.is_zero() {
            self.state = UserState::Failed;
            return Err(Srp6Error::ZeroScramblingParameter);
        }

        let mut x =
            calculate_private_key_x(self.config.hash(), &self.username, &self.password, s);
        let S = calculate_session_key_S_for_client(
            self.config.hash(),
            self.config.padding(),
            group,
            B,
            &self.a,
            &x,
            &u,
        );
        x.zeroize();
        let mut S = match S {
            Ok(S) => S,
            Err(e) => {
                self.state = UserState::Failed;
                return Err(e);
            }
        };

        self.K = calculate_session_key_hash_K(self.config.hash(), &S);
        S.zeroize();

        self.M = calculate_proof_M(
            self.config.hash(),
            self.config.padding(),
            group,
            &self.username,
            s,
            &self.A,
            B,
            &self.K,
        );
        self.M2 = calculate_strong_proof_M2(
            self.config.hash(),
            self.config.padding(),
            n_len,
            &self.A,
            &self.M,
            &self.K,
        );
        self.state = UserState::ChallengeProcessed;
        debug!("M = {:?}", hex::encode(&self.M));

        Ok(self.M.clone())
    }

    /// Checks the server's strong proof `M2` in constant time; a mismatch
    /// fails the session terminally.
    pub fn verify_server_proof(&mut self, servers_proof: &StrongProof) -> Result<()> {
        if self.state != UserState::ChallengeProcessed {
            return Err(Srp6Error::InvalidSessionState);
        }

        if proofs_match(&self.M2, servers_proof) {
            self.state = UserState::Authenticated;
            Ok(())
        } else {
            self.state = UserState::Failed;
            Err(Srp6Error::InvalidStrongProof(servers_proof.clone()))
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == UserState::Authenticated
    }

    pub fn username(&self) -> UsernameRef {
        &self.username
    }

    /// the session key `K`, available once the challenge was processed and
    /// hidden once the session has failed
    pub fn session_key(&self) -> Option<&[u8]> {
        match self.state {
            UserState::ChallengeProcessed | UserState::Authenticated => Some(&self.K),
            _ => None,
        }
    }

    pub fn session_key_length(&self) -> usize {
        self.config.session_key_length()
    }
}

impl Drop for ClientSession {
    fn drop(&mut self) {
        self.a.zeroize();
        self.K.zeroize();
        self.M.zeroize();
        self.M2.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::GroupId;
    use crate::hash::HashKind;

    #[test]
    fn debug_output_redacts_the_secrets() {
        let config = Srp6Config::new(HashKind::Sha256, GroupId::N2048);
        let client = ClientSession::new(&config, "alice", "password123");

        let printed = format!("{client:?}");
        let leaked = format!("{:?}", "password123".as_bytes());
        assert!(!printed.contains(&leaked), "password bytes in {printed}");
        assert!(printed.contains("<redacted>"));
    }
}
