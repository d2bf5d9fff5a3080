//! Integration tests for the catalog client
//!
//! These tests use wiremock to stand in for the shop and exercise login,
//! category discovery, listing traversal, lazy loading and the cart
//! end-to-end.

use std::time::Duration;
use tolvu_catalog::builder::{BuildSelection, BuildSlot, Builder};
use tolvu_catalog::catalog::extract_listing;
use tolvu_catalog::config::Config;
use tolvu_catalog::output::write_report;
use tolvu_catalog::{Catalog, CatalogError, ExtractMode, ScrapeError};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MENU_PAGE: &str = r#"<html><body>
<ul id="valmynd">
  <li><a href="/vorur/tolvuihlutir?">Tölvuíhlutir</a>
    <ul class="submenu">
      <li><a href="/vorur/tolvuihlutir/orgjorvar/am4?">AM4</a></li>
      <li><a href="/vorur/tolvuihlutir/orgjorvar/orgjorvakaelingar?">Kælingar</a></li>
      <li><a href="/vorur/tolvuihlutir/orgjorvar/am5?">AM5</a></li>
      <li><a href="/vorur/tolvuihlutir/vinnsluminni-bordtolvur/ddr4?">DDR4</a></li>
      <li><a href="/vorur/tolvuihlutir/modurbord/am4?">Móðurborð</a></li>
    </ul>
  </li>
  <li><a href="/vorur/hugbunadur?">Hugbúnaður</a>
    <ul class="submenu">
      <li><a href="/vorur/hugbunadur/microsoft-windows?">Windows</a></li>
    </ul>
  </li>
</ul>
</body></html>"#;

const AM4_PATH: &str = "/vorur/tolvuihlutir/orgjorvar/am4";

/// Creates a test configuration pointing at the mock server
fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.http.max_retries = 2;
    config.http.retry_delay_ms = 1;
    config.http.max_concurrent_pages = 2;
    config
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.into())
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn listing_block(href: &str, name: &str, price: &str) -> String {
    format!(
        r#"<div class="box-middle"><a href="{}">{}</a><div class="price">{}</div></div>"#,
        href, name, price
    )
}

fn listing_page(blocks: &[String], pagination: Option<&[&str]>) -> String {
    let control = pagination
        .map(|links| {
            let anchors: String = links
                .iter()
                .map(|href| format!(r#"<a href="{}">.</a>"#, href))
                .collect();
            format!(r#"<div class="paginationControl">{}</div>"#, anchors)
        })
        .unwrap_or_default();
    format!("<html><body>{}{}</body></html>", blocks.concat(), control)
}

fn detail_page(name: &str, discount: &str, common: &str, id: &str) -> String {
    format!(
        r#"<html><body>
        <div class="leftcontent"><a rel="prettyPhoto" href="/myndir/{id}.jpg">mynd</a></div>
        <div class="rightcontent">
            <h2>{name}</h2>
            <span class="modelnr">Tegundarnúmer: MODEL-{id}</span>
            <span class="modelnr">Vörunúmer: CAT-{id}</span>
            <span class="modelnr">Verð áður: {common}</span>
            <div class="price">{discount}</div>
            <div class="boxinfo"><h3>Lýsing</h3>Vara númer {id}</div>
            <form><input type="hidden" name="varaId" value="{id}"></form>
        </div>
        </body></html>"#,
        id = id,
        name = name,
        discount = discount,
        common = common
    )
}

/// Mounts a successful login and the front page menu
async fn mount_shop(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login/loginsubmit"))
        .and(body_string_contains("username=jon"))
        .respond_with(html("<html><body>Velkomin</body></html>"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(MENU_PAGE))
        .mount(server)
        .await;
}

async fn connect(server: &MockServer) -> Catalog {
    Catalog::connect(&test_config(&server.uri()), "jon", "leyndo")
        .await
        .expect("Failed to connect to mock shop")
}

#[tokio::test]
async fn test_connect_discovers_categories() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    let catalog = connect(&server).await;

    let names: Vec<&str> = catalog
        .categories()
        .categories()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["tolvuihlutir", "hugbunadur"]);
    assert_eq!(catalog.categories().sockets().unwrap(), vec!["am4", "am5"]);
    assert_eq!(catalog.categories().ram_types().unwrap(), vec!["ddr4"]);
    assert!(catalog.pages().contains("/"));
}

#[tokio::test]
async fn test_login_rejected_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/loginsubmit"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = Catalog::connect(&test_config(&server.uri()), "jon", "rangt").await;
    assert!(matches!(result, Err(CatalogError::Auth(_))));
}

#[tokio::test]
async fn test_login_unreachable_is_auth_error() {
    // Nothing listens on port 9 locally
    let result = Catalog::connect(&test_config("http://127.0.0.1:9"), "jon", "leyndo").await;
    assert!(matches!(result, Err(CatalogError::Auth(_))));
}

#[tokio::test]
async fn test_missing_menu_is_scrape_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/loginsubmit"))
        .respond_with(html("<html></html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<html><body><p>Lokað vegna viðhalds</p></body></html>"))
        .mount(&server)
        .await;

    let result = Catalog::connect(&test_config(&server.uri()), "jon", "leyndo").await;
    assert!(matches!(
        result,
        Err(CatalogError::Scrape(ScrapeError::MissingElement { .. }))
    ));
}

#[tokio::test]
async fn test_paginated_listing_is_aggregated_and_sorted() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    let page = |n: u32| format!("{}?page={}", AM4_PATH, n);
    let controls = [
        page(1),
        page(1),
        page(1),
        page(2),
        page(3),
        page(2),
        page(3),
    ];
    let controls: Vec<&str> = controls.iter().map(String::as_str).collect();

    let first: Vec<String> = [
        ("/vara/1", "Ryzen 5 5600", "24.990 kr."),
        ("/vara/2", "Ryzen 7 5800X", "44.990 kr."),
        ("/vara/3", "Ryzen 3 4100", "12.990 kr."),
        ("/vara/4", "Ryzen 5 5500", "19.990 kr."),
        ("/vara/5", "Ryzen 9 5900X", "69.990 kr."),
    ]
    .iter()
    .map(|(h, n, p)| listing_block(h, n, p))
    .collect();
    let second: Vec<String> = [
        ("/vara/6", "Ryzen 5 5600G", "27.990 kr."),
        ("/vara/7", "Ryzen 7 5700X", "34.990 kr."),
        ("/vara/8", "Athlon 3000G", "9.990 kr."),
        ("/vara/9", "Ryzen 5 5600X", "24.990 kr."),
        ("/vara/10", "Ryzen 7 5800X3D", "59.990 kr."),
    ]
    .iter()
    .map(|(h, n, p)| listing_block(h, n, p))
    .collect();
    let third: Vec<String> = [
        ("/vara/11", "Ryzen 9 5950X", "89.990 kr."),
        ("/vara/12", "Ryzen 5 4600G", "19.990 kr."),
    ]
    .iter()
    .map(|(h, n, p)| listing_block(h, n, p))
    .collect();

    // Page-specific mocks first so they win over the bare listing path
    Mock::given(method("GET"))
        .and(path(AM4_PATH))
        .and(query_param("page", "2"))
        .respond_with(html(listing_page(&second, Some(controls.as_slice()))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(AM4_PATH))
        .and(query_param("page", "3"))
        .respond_with(html(listing_page(&third, Some(controls.as_slice()))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(AM4_PATH))
        .respond_with(html(listing_page(&first, Some(controls.as_slice()))))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = connect(&server).await;
    let products = catalog
        .list_products("tolvuihlutir", "orgjorvar", Some("am4"), ExtractMode::Quick)
        .await
        .unwrap();

    assert_eq!(products.len(), 12);
    let prices: Vec<u64> = products.iter().map(|p| p.discount_price()).collect();
    let mut sorted = prices.clone();
    sorted.sort();
    assert_eq!(prices, sorted);
    assert_eq!(products[0].name(), "Athlon 3000G");

    // Equal prices keep page order: page 1 before page 2, page 1 before page 3
    let names: Vec<&str> = products.iter().map(|p| p.name()).collect();
    let pos = |name: &str| names.iter().position(|n| *n == name).unwrap();
    assert!(pos("Ryzen 5 5600") < pos("Ryzen 5 5600X"));
    assert!(pos("Ryzen 5 5500") < pos("Ryzen 5 4600G"));

    assert!(products.iter().all(|p| !p.is_full()));
    assert_eq!(catalog.known_products(), 12);

    // Listing again is served from the page cache and yields the same instances
    let again = catalog
        .list_products("tolvuihlutir", "orgjorvar", Some("am4"), ExtractMode::Quick)
        .await
        .unwrap();
    assert!(again[0].same_instance(&products[0]));
}

#[tokio::test]
async fn test_single_page_listing() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    let blocks = vec![
        listing_block("/vara/1", "Windows 11 Home", "24.990 kr."),
        listing_block("/vara/2", "Windows 11 Pro", "39.990 kr."),
    ];
    Mock::given(method("GET"))
        .and(path("/vorur/hugbunadur/microsoft-windows"))
        .respond_with(html(listing_page(&blocks, None)))
        .mount(&server)
        .await;

    let catalog = connect(&server).await;
    let systems = Builder::new(catalog).operating_systems().await.unwrap();

    let names: Vec<&str> = systems.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Windows 11 Home", "Windows 11 Pro"]);
}

#[tokio::test]
async fn test_lazy_load_fetches_detail_page_once() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    Mock::given(method("GET"))
        .and(path(AM4_PATH))
        .respond_with(html(listing_page(
            &[listing_block("/vara/40412", "Ryzen 5 5600", "23.990 kr.")],
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vara/40412"))
        .respond_with(html(detail_page(
            "AMD Ryzen 5 5600",
            "24.990 kr.",
            "27.990 kr.",
            "40412",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = connect(&server).await;
    let products = catalog
        .list_products("tolvuihlutir", "orgjorvar", Some("am4"), ExtractMode::Quick)
        .await
        .unwrap();
    let cpu = &products[0];
    assert!(!cpu.is_full());
    assert_eq!(cpu.name(), "Ryzen 5 5600");

    assert_eq!(cpu.common_price().await.unwrap(), 27_990);
    assert_eq!(cpu.model_no().await.unwrap(), "MODEL-40412");
    assert_eq!(cpu.catalog_no().await.unwrap(), "CAT-40412");
    assert_eq!(cpu.description().await.unwrap(), "Vara númer 40412");
    assert_eq!(cpu.add_to_cart_id().await.unwrap(), "40412");
    assert!(cpu.image_url().await.unwrap().ends_with("/myndir/40412.jpg"));

    // Upgraded in place: detail page values win
    assert!(cpu.is_full());
    assert_eq!(cpu.name(), "AMD Ryzen 5 5600");
    assert_eq!(cpu.discount_price(), 24_990);

    // A cached lookup of the same URL is the same instance, no new fetch
    let same = catalog.get_product("/vara/40412", true).await.unwrap();
    assert!(same.same_instance(cpu));
}

/// Mounts a one-product am4 listing and its detail page, answered after `delay`
async fn mount_slow_detail(server: &MockServer, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(AM4_PATH))
        .respond_with(html(listing_page(
            &[listing_block("/vara/40412", "Ryzen 5 5600", "23.990 kr.")],
            None,
        )))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vara/40412"))
        .respond_with(
            html(detail_page(
                "AMD Ryzen 5 5600",
                "24.990 kr.",
                "27.990 kr.",
                "40412",
            ))
            .set_delay(delay),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_concurrent_reads_share_one_detail_fetch() {
    let server = MockServer::start().await;
    mount_shop(&server).await;
    mount_slow_detail(&server, Duration::from_millis(200)).await;

    let catalog = connect(&server).await;
    let products = catalog
        .list_products("tolvuihlutir", "orgjorvar", Some("am4"), ExtractMode::Quick)
        .await
        .unwrap();
    let a = products[0].clone();
    let b = products[0].clone();
    assert!(!a.is_full());

    // Both reads start while the detail page is still in flight
    let (common, model) = tokio::join!(a.common_price(), b.model_no());

    assert_eq!(common.unwrap(), 27_990);
    assert_eq!(model.unwrap(), "MODEL-40412");
    assert!(a.is_full() && b.is_full());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_catalog_works_from_spawned_tasks() {
    let server = MockServer::start().await;
    mount_shop(&server).await;
    mount_slow_detail(&server, Duration::from_millis(100)).await;

    let catalog = connect(&server).await;
    let products = catalog
        .list_products("tolvuihlutir", "orgjorvar", Some("am4"), ExtractMode::Quick)
        .await
        .unwrap();

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let product = products[0].clone();
            tokio::spawn(async move { product.common_price().await })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), 27_990);
    }
    assert_eq!(catalog.known_products(), 1);
}

#[tokio::test]
async fn test_full_mode_listing_loads_details() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    Mock::given(method("GET"))
        .and(path(AM4_PATH))
        .respond_with(html(listing_page(
            &[
                listing_block("/vara/2", "B", "2 kr."),
                listing_block("/vara/1", "A", "1 kr."),
            ],
            None,
        )))
        .mount(&server)
        .await;
    for (id, price) in [("1", "5.000 kr."), ("2", "3.000 kr.")] {
        Mock::given(method("GET"))
            .and(path(format!("/vara/{}", id)))
            .respond_with(html(detail_page(&format!("Vara {}", id), price, price, id)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let catalog = connect(&server).await;
    let products = catalog
        .list_products("tolvuihlutir", "orgjorvar", Some("am4"), ExtractMode::Full)
        .await
        .unwrap();

    assert!(products.iter().all(|p| p.is_full()));
    // Sorted on the detail page prices
    let names: Vec<&str> = products.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Vara 2", "Vara 1"]);
}

#[tokio::test]
async fn test_latin1_bytes_in_page_are_recovered() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    let mut body = b"<html><body><div class=\"box-middle\"><a href=\"/vara/7\">Lyklabor".to_vec();
    body.push(0xF0); // Latin-1 eth
    body.extend_from_slice(b"</a><div class=\"price\">4.990 kr.</div></div></body></html>");

    Mock::given(method("GET"))
        .and(path(AM4_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;

    let catalog = connect(&server).await;
    let products = catalog
        .list_products("tolvuihlutir", "orgjorvar", Some("am4"), ExtractMode::Quick)
        .await
        .unwrap();
    assert_eq!(products[0].name(), "Lyklaborð");
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    Mock::given(method("GET"))
        .and(path(AM4_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(AM4_PATH))
        .respond_with(html(listing_page(
            &[listing_block("/vara/1", "Ryzen", "1.000 kr.")],
            None,
        )))
        .mount(&server)
        .await;

    let catalog = connect(&server).await;
    let products = catalog
        .list_products("tolvuihlutir", "orgjorvar", Some("am4"), ExtractMode::Quick)
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    Mock::given(method("GET"))
        .and(path("/vara/404"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = connect(&server).await;
    let result = catalog.get_product("/vara/404", true).await;
    assert!(matches!(result, Err(CatalogError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_search() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    Mock::given(method("GET"))
        .and(path("/leita/ryzen"))
        .respond_with(html(listing_page(
            &[
                listing_block("/vara/2", "Ryzen 7", "44.990 kr."),
                listing_block("/vara/1", "Ryzen 5", "24.990 kr."),
            ],
            None,
        )))
        .mount(&server)
        .await;

    let catalog = connect(&server).await;
    let found = catalog.search("ryzen", ExtractMode::Quick).await.unwrap();
    let names: Vec<&str> = found.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Ryzen 5", "Ryzen 7"]);

    assert!(matches!(
        catalog.search("   ", ExtractMode::Quick).await,
        Err(CatalogError::Validation(_))
    ));
}

#[tokio::test]
async fn test_cart_is_never_cached() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    Mock::given(method("GET"))
        .and(path("/karfa"))
        .respond_with(html(
            r#"<html><body><div class="details"><a href="/vara/40412">Ryzen</a></div></body></html>"#,
        ))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vara/40412"))
        .respond_with(html(detail_page("Ryzen 5 5600", "24.990 kr.", "27.990 kr.", "40412")))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = connect(&server).await;
    let first = catalog.get_cart().await.unwrap();
    let second = catalog.get_cart().await.unwrap();

    assert_eq!(first.len(), 1);
    assert!(first[0].is_full());
    assert!(first[0].same_instance(&second[0]));
}

#[tokio::test]
async fn test_form_pages_are_not_cached() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    Mock::given(method("POST"))
        .and(path("/leita"))
        .and(body_string_contains("q=ryzen"))
        .respond_with(html(listing_page(
            &[listing_block("/vara/1", "Ryzen 5", "24.990 kr.")],
            None,
        )))
        .expect(2)
        .mount(&server)
        .await;

    let catalog = connect(&server).await;
    let cached_before = catalog.pages().len();
    for _ in 0..2 {
        let doc = catalog
            .pages()
            .document_with_form("/leita", &[("q", "ryzen")])
            .await
            .unwrap();
        let entries = extract_listing(&doc, catalog.base_url()).unwrap();
        assert_eq!(entries[0].name, "Ryzen 5");
    }
    assert_eq!(catalog.pages().len(), cached_before);
}

#[tokio::test]
async fn test_add_to_cart() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    Mock::given(method("GET"))
        .and(path("/vara/40412"))
        .respond_with(html(detail_page("Ryzen 5 5600", "24.990 kr.", "27.990 kr.", "40412")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/karfa/add_to_cart"))
        .and(body_string_contains("varaId=40412"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = connect(&server).await;
    let product = catalog.get_product("/vara/40412", true).await.unwrap();
    catalog.add_to_cart(&product).await.unwrap();
}

#[tokio::test]
async fn test_add_to_cart_failure_status() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    Mock::given(method("GET"))
        .and(path("/vara/40412"))
        .respond_with(html(detail_page("Ryzen 5 5600", "24.990 kr.", "27.990 kr.", "40412")))
        .mount(&server)
        .await;
    // Cart additions are not idempotent and must not be retried
    Mock::given(method("POST"))
        .and(path("/karfa/add_to_cart"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = connect(&server).await;
    let product = catalog.get_product("/vara/40412", true).await.unwrap();
    let result = catalog.add_to_cart(&product).await;
    assert!(matches!(result, Err(CatalogError::Cart { status: 500, .. })));
}

#[tokio::test]
async fn test_builder_validates_before_fetching() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    let builder = Builder::new(connect(&server).await);
    assert!(matches!(
        builder.storage("tape").await,
        Err(CatalogError::Validation(_))
    ));
    assert!(matches!(
        builder.cpus("lga9999").await,
        Err(CatalogError::Validation(_))
    ));
    // Cooling entries are not sockets
    assert!(matches!(
        builder.cpus("orgjorvakaelingar").await,
        Err(CatalogError::Validation(_))
    ));
}

#[tokio::test]
async fn test_build_report() {
    let server = MockServer::start().await;
    mount_shop(&server).await;

    Mock::given(method("GET"))
        .and(path(AM4_PATH))
        .respond_with(html(listing_page(
            &[listing_block("/vara/1", "Ryzen 5", "23.990 kr.")],
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vorur/tolvuihlutir/modurbord/am4"))
        .respond_with(html(listing_page(
            &[listing_block("/vara/2", "B550 borð", "19.990 kr.")],
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vara/1"))
        .respond_with(html(detail_page("AMD Ryzen 5 5600", "24.990 kr.", "27.990 kr.", "1")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vara/2"))
        .respond_with(html(detail_page("MSI B550", "19.990 kr.", "21.990 kr.", "2")))
        .mount(&server)
        .await;

    let builder = Builder::new(connect(&server).await);
    let mut selection = BuildSelection::new();
    let cpu = builder.cpus("am4").await.unwrap().remove(0);
    let board = builder.motherboards("am4").await.unwrap().remove(0);
    selection.set(BuildSlot::Cpu, cpu);
    selection.set(BuildSlot::Motherboard, board);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("build.txt");

    // Summaries cannot be totalled yet
    assert!(matches!(
        write_report(&selection, &out),
        Err(CatalogError::Validation(_))
    ));

    selection.ensure_full().await.unwrap();
    write_report(&selection, &out).unwrap();

    let report = std::fs::read_to_string(&out).unwrap();
    let base = server.uri();
    assert!(report.starts_with(&format!(
        "AMD Ryzen 5 5600 - 24990 / 27990 ({}/vara/1)\nMSI B550 - 19990 / 21990 ({}/vara/2)\n",
        base, base
    )));
    assert!(report.contains("Samtals: 44980"));
    assert!(report.contains("Fullt verð: 49980"));
}
