//! Contract tests for the typed trust-service clients and the
//! `TrustClient` facade, simulated with wiremock.

use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sdx_core::{Did, StringValue};
use sdx_subject::{CredentialSubject, LegalRegistrationNumber, SubjectBase, SubjectRegistry};
use sdx_trust_client::{
    ComplianceClient, EndpointConfig, NotaryClient, RegistrationNumberCheck, TrustClient,
    TrustClientConfig, TrustServiceError,
};
use sdx_vc::{
    random_urn, Ed25519Scheme, VerifiableCredential, VerifiablePresentation,
};

/// A signed presentation around one LegalRegistrationNumber credential.
fn signed_presentation() -> VerifiablePresentation {
    let registry = SubjectRegistry::default();
    let subject = registry
        .encode(&CredentialSubject::LegalRegistrationNumber(
            LegalRegistrationNumber {
                base: SubjectBase::new("https://catalog.example/lrn/1"),
                vat_id: Some(StringValue::new("FR79537407926")),
                ..Default::default()
            },
        ))
        .unwrap();

    let issuer = Did::new("did:web:provider.example").unwrap();
    let (key, anchor) = Ed25519Scheme::generate_keypair("own");
    let scheme = Ed25519Scheme;

    let mut vc = VerifiableCredential::new(subject, &issuer, random_urn())
        .with_type("LegalRegistrationNumber");
    vc.sign(&scheme, "did:web:provider.example#key-1", &key, &[anchor.clone()])
        .unwrap();

    let mut vp = VerifiablePresentation::new(vec![vc], random_urn());
    vp.sign(&scheme, "did:web:provider.example#key-1", &key, &[anchor])
        .unwrap();
    vp
}

#[tokio::test]
async fn compliance_check_posts_presentation_and_returns_credential() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/credential-offers"))
        .and(body_partial_json(serde_json::json!({
            "type": ["VerifiablePresentation"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "@context": ["https://www.w3.org/2018/credentials/v1"],
            "id": "https://compliance.example/credentials/42",
            "type": ["VerifiableCredential"],
            "issuer": "did:web:compliance.example",
            "issuanceDate": "2026-03-01T10:00:00Z",
            "credentialSubject": {"id": "https://catalog.example/lrn/1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ComplianceClient::new(reqwest::Client::new(), server.uri().parse().unwrap());
    let credential = client.check_compliance(&signed_presentation()).await.unwrap();
    assert_eq!(credential["issuer"], "did:web:compliance.example");
}

#[tokio::test]
async fn compliance_rejection_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/credential-offers"))
        .respond_with(
            ResponseTemplate::new(409).set_body_string(r#"{"error":"signature not trusted"}"#),
        )
        .mount(&server)
        .await;

    let client = ComplianceClient::new(reqwest::Client::new(), server.uri().parse().unwrap());
    let err = client
        .check_compliance(&signed_presentation())
        .await
        .unwrap_err();
    match err {
        TrustServiceError::Api { status, body, .. } => {
            assert_eq!(status, 409);
            assert!(body.contains("signature not trusted"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn notary_returns_typed_credential() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/registrationNumberVC"))
        .and(query_param("participantID", "did:web:provider.example"))
        .and(body_partial_json(serde_json::json!({"vatID": "FR79537407926"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "@context": [
                "https://www.w3.org/2018/credentials/v1",
                "https://w3id.org/security/suites/jws-2020/v1"
            ],
            "id": "https://notary.example/credentials/7",
            "type": ["VerifiableCredential", "LegalRegistrationNumber"],
            "issuer": "did:web:notary.example",
            "issuanceDate": "2026-03-01T10:00:00Z",
            "credentialSubject": {
                "type": "LegalRegistrationNumber",
                "id": "https://catalog.example/lrn/1",
                "gx:vatID": {"@type": "xsd:string", "@value": "FR79537407926"}
            },
            "proof": {
                "type": "JsonWebSignature2020",
                "created": "2026-03-01T10:00:00Z",
                "proofPurpose": "assertionMethod",
                "verificationMethod": "did:web:notary.example#key-1",
                "jws": "eyJhbGciOiJFZERTQSIsImI2NCI6ZmFsc2UsImNyaXQiOlsiYjY0Il19..c2ln"
            }
        })))
        .mount(&server)
        .await;

    let client = NotaryClient::new(reqwest::Client::new(), server.uri().parse().unwrap());
    let check = RegistrationNumberCheck {
        vat_id: Some("FR79537407926".to_string()),
        ..Default::default()
    };
    let participant = Did::new("did:web:provider.example").unwrap();
    let vc = client
        .verify_registration_number(&check, &participant)
        .await
        .unwrap();

    assert_eq!(vc.issuer, "did:web:notary.example");
    assert!(vc.proof.is_some());
    // The subject decodes through the registry like any catalog document.
    let subject = SubjectRegistry::default()
        .decode(&vc.credential_subject)
        .unwrap();
    let lrn: LegalRegistrationNumber = subject.cast().unwrap();
    assert_eq!(lrn.vat_id.unwrap().as_str(), "FR79537407926");
}

#[tokio::test]
async fn facade_dispatches_past_dead_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/credential-offers"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "issuer": "did:web:compliance.example"
        })))
        .mount(&server)
        .await;

    let mut config = TrustClientConfig::local_mock(9300).unwrap();
    config.compliance_endpoints = vec![
        // Dead first entry; dispatch must fall through to the mock.
        EndpointConfig::from_url("http://127.0.0.1:9".parse().unwrap()),
        EndpointConfig::from_url(server.uri().parse().unwrap()),
    ];
    config.timeout_secs = 2;

    let client = TrustClient::new(config).unwrap();
    let result = client.check_compliance(&signed_presentation()).await;
    assert_eq!(
        result.unwrap()["issuer"],
        serde_json::json!("did:web:compliance.example")
    );
}

#[tokio::test]
async fn facade_reports_soft_failure_when_all_endpoints_fail() {
    let mut config = TrustClientConfig::local_mock(9310).unwrap();
    config.notary_endpoints = vec![EndpointConfig::from_url(
        "http://127.0.0.1:9".parse().unwrap(),
    )];
    config.timeout_secs = 2;

    let client = TrustClient::new(config).unwrap();
    let check = RegistrationNumberCheck {
        vat_id: Some("FR79537407926".to_string()),
        ..Default::default()
    };
    let participant = Did::new("did:web:provider.example").unwrap();
    let result = client.verify_registration_number(&check, &participant).await;
    assert!(result.is_none());
}
