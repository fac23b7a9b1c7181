// Shared fixtures: a wiremock server standing in for the router admin panel
use std::time::Duration;
use wavemaker_stats::config::Credentials;
use wavemaker_stats::services::{RouterClient, RouterEndpoints, RouterSession};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_TOKEN: &str = "a1B2c3";
pub const TEST_PASSWORD: &str = "hunter2";
/// sha1("hunter2" + "a1B2c3")
pub const TEST_SHA_PASSWORD: &str = "b3a91816e6e2eedb7b406c875065816a2c5e063c";

pub fn login_page(token: &str) -> String {
    format!(
        r#"<html><body><form>
            <input type="hidden" id="gSecureToken" value="{token}" />
            <input type="password" id="password" />
        </form></body></html>"#
    )
}

pub fn diagnostics_page() -> String {
    r#"<html><body>
        <div class="label">Status</div>
        <div class="input" id="internetStatus4G">Connected</div>
        <div class="input" id="internetStatusTech">LTE</div>
        <div class="input" id="band">B3</div>
        <div class="input" id="bandwidth"> 20 MHz </div>
        <div class="input" id="internetStatus4gRSSI">-71</div>
    </body></html>"#
        .to_string()
}

pub fn field_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn credentials(password: &str) -> Credentials {
    Credentials {
        username: "admin".to_string(),
        password: password.to_string(),
    }
}

pub fn endpoints(server: &MockServer) -> RouterEndpoints {
    RouterEndpoints::from_base(&server.uri())
}

pub fn session() -> RouterSession {
    RouterSession::new(Duration::from_secs(5)).expect("Failed to build session")
}

pub fn client(server: &MockServer, password: &str) -> RouterClient {
    RouterClient::new(endpoints(server), credentials(password), Duration::from_secs(5))
}

pub async fn mount_login_page(server: &MockServer, token: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_page(token)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn mount_submit_login(server: &MockServer, status: u16, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/submitLogin/"))
        .respond_with(ResponseTemplate::new(status))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn mount_diagnostics(server: &MockServer, status: u16, body: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/diagnostics/"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}
