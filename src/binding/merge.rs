// SPDX-License-Identifier: MPL-2.0
//! Folding a root component's localization options into the root instance.

use crate::i18n::messages::resolve_locale_messages;
use crate::i18n::{Localization, LocalizationOptions};

fn assign<T: Clone>(target: &mut T, value: Option<&T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

/// Merges `options` into `root` and returns the same instance.
///
/// Every setting the options leave unset keeps the root's current value.
/// Catalogs are merged per locale, entry by entry: keys the options do not
/// mention survive.
pub fn merge_to_root(root: &Localization, options: &LocalizationOptions) -> Localization {
    root.update_settings(|settings| {
        assign(&mut settings.locale, options.locale.as_ref());
        assign(&mut settings.fallback_locale, options.fallback_locale.as_ref());
        if options.missing.is_some() {
            settings.missing.clone_from(&options.missing);
        }
        assign(
            &mut settings.silent_translation_warn,
            options.silent_translation_warn.as_ref(),
        );
        assign(
            &mut settings.silent_fallback_warn,
            options.silent_fallback_warn.as_ref(),
        );
        assign(
            &mut settings.format_fallback_messages,
            options.format_fallback_messages.as_ref(),
        );
        if options.post_translation.is_some() {
            settings.post_translation.clone_from(&options.post_translation);
        }
        assign(
            &mut settings.warn_html_in_message,
            options.warn_html_in_message.as_ref(),
        );
        assign(
            &mut settings.escape_parameter_html,
            options.escape_parameter_html.as_ref(),
        );
        assign(&mut settings.sync, options.sync.as_ref());
    });

    // Anchored on the locale just merged.
    let messages = resolve_locale_messages(
        &root.locale(),
        options.messages.as_ref(),
        &options.inline_blocks,
    );
    for (locale, tree) in &messages {
        root.merge_locale_message(locale, tree);
    }

    if let Some(datetime_formats) = &options.datetime_formats {
        for (locale, formats) in datetime_formats {
            root.merge_datetime_format(locale, formats);
        }
    }
    if let Some(number_formats) = &options.number_formats {
        for (locale, formats) in number_formats {
            root.merge_number_format(locale, formats);
        }
    }

    tracing::debug!(
        locale = %root.locale(),
        locales = messages.len(),
        "merged component options into the root instance"
    );
    root.clone()
}
