//! Markup rendered by the client itself rather than fetched.

/// In-place fragment shown when a page fails to load.
///
/// The button carries `data-action="reload"`, which the click router turns
/// into a full page reload.
pub const LOAD_ERROR_FRAGMENT: &str = r#"
<div style="text-align: center; padding: 4rem 2rem; color: var(--couleur-erreur);">
    <h2>Erreur de chargement</h2>
    <p>Impossible de charger la page demandée. Veuillez réessayer.</p>
    <button type="button" data-action="reload" style="margin-top: 1rem; padding: 0.5rem 1rem; background: var(--couleur-primaire); color: white; border: none; border-radius: 0.5rem; cursor: pointer;">
        Recharger la page
    </button>
</div>
"#;

pub const MODAL_TITLE_ID: &str = "modal-miseajour-title";
pub const MODAL_TITLE: &str = "Mise à jour en cours";
pub const MODAL_MESSAGE: &str = "Veuillez réessayer plus tard !";
pub const MODAL_CLOSE_LABEL: &str = "OK";
pub const MODAL_CLOSE_ARIA: &str = "Fermer la fenêtre";

pub const COPY_SUCCESS_MESSAGE: &str = "Copié dans le presse-papiers !";
pub const COPY_FAILURE_MESSAGE: &str = "Erreur lors de la copie";
