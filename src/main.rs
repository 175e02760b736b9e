#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use connections::app::*;
    use connections::dataset::Dataset;
    use dotenvy::dotenv;
    use leptos::logging::{error, log};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};

    // LEPTOS_* variables override the site settings in Cargo.toml.
    dotenv().ok();

    let dataset = match Dataset::embedded() {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("invalid puzzle data: {e}");
            std::process::exit(1);
        }
    };
    log!(
        "loaded {} puzzles ({} to {})",
        dataset.len(),
        dataset.earliest().date,
        dataset.latest().date
    );

    let conf = get_configuration(None).expect("Failed to read Leptos configuration.");
    let addr = conf.leptos_options.site_addr;
    let leptos_options = conf.leptos_options;
    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            // Every request shares the dataset loaded above.
            move || provide_context(dataset.clone()),
            // Use App for main routes.
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        // Use shell for fallback.
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options);

    log!("listening on http://{}", &addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener.");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error.");
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}
