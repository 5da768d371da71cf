use srp6a::*;
use std::time::{Duration, Instant};

fn main() {
    let username = "Bob";
    let password: &ClearTextPassword = "secret-password";
    let config = Srp6Config::new(HashKind::Sha512, GroupId::N4096);
    // new user : those are sent to the server and stored there
    let user_details = generate_user_secrets(&config, username, password);
    // averaging durations
    let mut durations: Duration = Duration::default();
    #[cfg(debug_assertions)]
    const NLOOPS: u32 = 10;
    #[cfg(not(debug_assertions))]
    const NLOOPS: u32 = 100;
    for _ in 0..NLOOPS {
        let start = Instant::now();
        // user creates a handshake
        let mut client = ClientSession::new(&config, username, password);
        let user_handshake = client.start_authentication().unwrap();
        // server retrieves stored details and continues the handshake
        let (mut server, challenge) = ServerSession::new(
            &config,
            &user_details.username,
            &user_details.salt,
            &user_details.verifier,
            &user_handshake.user_publickey,
            None,
        )
        .expect("invalid client public key");
        // client side
        let proof = client.process_challenge(&challenge).unwrap();
        // server side
        let strong_proof = server.verify_client_proof(&proof).expect("invalid client proof");
        // client side
        client
            .verify_server_proof(&strong_proof)
            .expect("invalid server proof");
        // end of processing
        let duration = start.elapsed();
        durations = durations.checked_add(duration).unwrap();
        // session keys are the same
        assert_eq!(client.session_key(), server.session_key(), "not same keys");
    }

    println!("Time elapsed in auth is: {:?}", durations / NLOOPS);
}
