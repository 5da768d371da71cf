use srp6a::*;

fn main() {
    // this is what a user would enter in a form / terminal
    let new_username: UsernameRef = "Bob";
    let user_password: &ClearTextPassword = "secret-password";

    let config = Srp6Config::new(HashKind::Sha512, GroupId::N4096);
    let user_details = generate_user_secrets(&config, new_username, user_password);
    assert!(user_details.verifier.num_bytes() <= 4096 / 8);

    println!("Simulating a server and signup with user {}", new_username);
    println!(" - User's username   [I] = {:?}", &user_details.username);
    println!(" - Salt              [s] = {:?}", &user_details.salt);
    println!(" - Password verifier [v] = {:?}", &user_details.verifier);
    println!("This is a one time action, normally this data is stored in a user database");
    println!();
    println!("Next authentication process `cargo run --example 02_authentication`");
}
