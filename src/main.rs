use anyhow::Result;
use component_filter_api::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("🛡️  Component Filter API Demo");

    // Create an engine with the default config (ad removal on)
    let engine = FilterEngine::from_config(&FilterConfig::default());

    // Sample (path, identifier) descriptors as the rendering pipeline
    // would submit them
    let descriptors = vec![
        ("cell_layout|home_video_with_context.eml", ""),
        ("cell_layout|banner_ad_wrapper.eml", ""),
        ("shelf|paid_content_overlay.eml", ""),
        ("cell_layout|product_carousel.eml", ""),
        ("comment_thread|banner_ad_layout.eml", ""),
        ("shelf|inline_content.eml", "shorts_shelf"),
    ];

    println!("\n📋 Evaluating descriptors:");
    for (path, identifier) in descriptors {
        let result = engine.check(path, identifier);
        let status = if result.should_block { "🚫 BLOCKED" } else { "✅ ALLOWED" };
        println!("{} - {} ({})", status, path, result.reason);
    }

    // Example of advanced usage
    println!("\n🔧 Advanced Usage Example:");
    let config = FilterConfig {
        enable_custom_filter: true,
        custom_components: "my_promo_shelf,unwanted_teaser".to_string(),
        hide_comments_section: true,
        ..FilterConfig::aggressive()
    };

    let advanced_engine = FilterEngine::from_config(&config);

    let custom_test = advanced_engine.check("feed|my_promo_shelf.eml", "");
    println!(
        "Custom filter test: {} - {}",
        if custom_test.should_block { "🚫 BLOCKED" } else { "✅ ALLOWED" },
        custom_test.reason
    );

    let stats = engine.stats();
    println!(
        "\n📊 {} of {} descriptors blocked ({:.1}%)",
        stats.blocked,
        stats.total_evaluations,
        stats.block_percentage()
    );

    println!("\n✨ Component Filter API is ready for integration!");

    Ok(())
}
