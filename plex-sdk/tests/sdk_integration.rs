//! End-to-end flows against mock directory, server and player

use mockito::{Matcher, Server};
use plex_connect::ResolveError;
use plex_sdk::{
    AddressForm, ClientIdentity, CommandRoute, DirectoryConfig, PlexAccount, SdkError, ServerConnection,
    ServerSession, SubtitleMode,
};

const IDENTITY: &str = r#"<MediaContainer friendlyName="Basement" machineIdentifier="srv-1" version="1.40.1"/>"#;

fn host_and_port(server: &Server) -> (String, u16) {
    let host_with_port = server.host_with_port();
    let (host, port) = host_with_port.rsplit_once(':').unwrap();
    (host.to_string(), port.parse().unwrap())
}

fn resources_xml(media: &Server, owned: bool) -> String {
    let (host, port) = host_and_port(media);
    format!(
        r#"<MediaContainer size="1">
  <Device name="Basement" product="Plex Media Server" provides="server" owned="{}" accessToken="srv-token" clientIdentifier="srv-1">
    <Connection protocol="http" address="{}" port="{}" uri="{}" local="1"/>
  </Device>
</MediaContainer>"#,
        u8::from(owned),
        host,
        port,
        media.url()
    )
}

fn config(directory: &Server) -> DirectoryConfig {
    DirectoryConfig::new()
        .with_base_url(directory.url())
        .with_identity(ClientIdentity::with_client_identifier("sdk-test"))
}

#[tokio::test]
async fn test_connect_to_owned_resource() {
    let mut media = Server::new_async().await;
    let probe = media
        .mock("GET", "/")
        .match_header("x-plex-token", "srv-token")
        .match_header("x-plex-client-identifier", "sdk-test")
        .with_status(200)
        .with_body(IDENTITY)
        .expect_at_least(1)
        .create_async()
        .await;

    let mut directory = Server::new_async().await;
    directory
        .mock("GET", "/api/resources")
        .match_query(Matcher::Any)
        .match_header("x-plex-token", "acct-token")
        .with_status(200)
        .with_body(resources_xml(&media, true))
        .create_async()
        .await;

    let account = PlexAccount::from_token(config(&directory), "acct-token").unwrap();
    let resource = account.resource("basement").await.unwrap();
    let session = account.connect(&resource, None).await.unwrap();

    assert_eq!(session.machine_identifier(), "srv-1");
    assert_eq!(session.base_url(), media.url());
    assert_eq!(session.connection().token(), "srv-token");
    probe.assert_async().await;
}

#[tokio::test]
async fn test_shared_resource_with_only_local_connections() {
    let mut media = Server::new_async().await;
    let probe = media
        .mock("GET", "/")
        .with_status(200)
        .with_body(IDENTITY)
        .expect(0)
        .create_async()
        .await;

    let mut directory = Server::new_async().await;
    directory
        .mock("GET", "/api/resources")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(resources_xml(&media, false))
        .create_async()
        .await;

    let account = PlexAccount::from_token(config(&directory), "acct-token").unwrap();
    let resource = account.resource("Basement").await.unwrap();
    let error = account.connect(&resource, Some(AddressForm::Plain)).await.unwrap_err();

    assert!(matches!(error, SdkError::Resolve(ResolveError::NoEligibleEndpoints { .. })));
    probe.assert_async().await;
}

#[tokio::test]
async fn test_unknown_resource() {
    let mut directory = Server::new_async().await;
    directory
        .mock("GET", "/api/resources")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"<MediaContainer size="0"></MediaContainer>"#)
        .create_async()
        .await;

    let account = PlexAccount::from_token(config(&directory), "acct-token").unwrap();
    let error = account.resource("Attic").await.unwrap_err();
    assert!(matches!(error, SdkError::Discovery(plex_discovery::DiscoveryError::NotFound(_))));
}

fn session(media: &Server) -> ServerSession {
    ServerSession::new(ServerConnection::new(media.url(), "srv-token", "srv-1"))
}

fn clients_xml(player: &Server) -> String {
    let (host, port) = host_and_port(player);
    format!(
        r#"<MediaContainer size="2">
  <Server name="Living Room" host="{host}" address="{host}" port="{port}" machineIdentifier="p-1" product="Plex HTPC" protocolCapabilities="timeline,playback,navigation"/>
  <Server name="Bedroom" host="10.0.0.40" address="10.0.0.40" port="32500" machineIdentifier="p-2"/>
</MediaContainer>"#
    )
}

#[test]
fn test_clients_listing() {
    let player = Server::new();
    let mut media = Server::new();
    media
        .mock("GET", "/clients")
        .match_header("x-plex-token", "srv-token")
        .with_status(200)
        .with_body(clients_xml(&player))
        .create();

    let session = session(&media);
    let players = session.clients().unwrap();

    assert_eq!(players.len(), 2);
    assert_eq!(players[1].name(), "Bedroom");
    assert_eq!(session.client("living room").unwrap().info().machine_identifier.as_deref(), Some("p-1"));
    assert!(matches!(session.client("Kitchen"), Err(SdkError::PlayerNotFound(_))));
}

#[test]
fn test_command_relayed_by_server() {
    let player = Server::new();
    let (player_host, _) = host_and_port(&player);
    let mut media = Server::new();
    media
        .mock("GET", "/clients")
        .with_status(200)
        .with_body(clients_xml(&player))
        .create();
    let relay = media
        .mock("GET", format!("/system/players/{}/playback/pause", player_host).as_str())
        .match_header("x-plex-token", "srv-token")
        .with_status(200)
        .create();

    let living_room = session(&media).client("Living Room").unwrap();
    assert_eq!(living_room.route(), CommandRoute::Server);
    living_room.pause().unwrap();

    relay.assert();
}

#[test]
fn test_direct_play_media() {
    let mut player = Server::new();
    let direct = player
        .mock("GET", "/player/playback/playMedia")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("machineIdentifier".into(), "srv-1".into()),
            Matcher::UrlEncoded("containerKey".into(), "/playQueues/7?window=100&own=1".into()),
            Matcher::UrlEncoded("key".into(), "/library/metadata/99".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
        ]))
        .with_status(200)
        .create();

    let mut media = Server::new();
    media
        .mock("GET", "/clients")
        .with_status(200)
        .with_body(clients_xml(&player))
        .create();

    let living_room = session(&media)
        .client("Living Room")
        .unwrap()
        .with_route(CommandRoute::Direct);
    living_room.play_media(7, "/library/metadata/99", 0).unwrap();

    direct.assert();
}

#[test]
fn test_navigate_points_player_at_session_server() {
    let mut player = Server::new();
    let mut media = Server::new();
    let (media_host, media_port) = host_and_port(&media);
    let mirror = player
        .mock("GET", "/player/mirror/details")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("key".into(), "/library/metadata/99".into()),
            Matcher::UrlEncoded("machineIdentifier".into(), "srv-1".into()),
            Matcher::UrlEncoded("address".into(), media_host),
            Matcher::UrlEncoded("port".into(), media_port.to_string()),
            Matcher::UrlEncoded("commandID".into(), "2".into()),
        ]))
        .with_status(200)
        .create();
    media
        .mock("GET", "/clients")
        .with_status(200)
        .with_body(clients_xml(&player))
        .create();

    session(&media)
        .client("Living Room")
        .unwrap()
        .navigate("/library/metadata/99")
        .unwrap();

    mirror.assert();
}

#[test]
fn test_subtitle_without_active_player() {
    let mut player = Server::new();
    player
        .mock("GET", "/jsonrpc")
        .match_query(Matcher::Regex("GetActivePlayers".to_string()))
        .with_status(200)
        .with_body(r#"{"jsonrpc":"2.0","id":1,"result":[]}"#)
        .create();
    let mut media = Server::new();
    media
        .mock("GET", "/clients")
        .with_status(200)
        .with_body(clients_xml(&player))
        .create();

    let error = session(&media)
        .client("Living Room")
        .unwrap()
        .subtitle(SubtitleMode::Next)
        .unwrap_err();

    assert!(matches!(error, SdkError::NoActivePlayer(_)));
}

#[test]
fn test_is_playing_media() {
    let mut media = Server::new();
    media
        .mock("GET", "/timeline/poll")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"<MediaContainer commandID="4">
  <Timeline type="music" state="stopped"/>
  <Timeline type="video" state="playing" key="/library/metadata/99"/>
</MediaContainer>"#,
        )
        .create();

    let session = session(&media);
    assert!(session.is_playing_media().unwrap());
    assert_eq!(session.timeline().unwrap().len(), 2);
}
