//! Localized notices
//!
//! One catalogue of the short messages shown after an action, in English
//! and French. Bulk loads report a single generic failure; each action has
//! its own success and failure wording.

use crate::config::Locale;

/// Resource an action applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Transaction,
    Category,
    Wallet,
    Budget,
}

/// What the user just did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Created,
    Updated,
    Deleted,
}

/// A message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// An action succeeded
    Done(Resource, Action),
    /// Creating or editing failed
    SaveFailed(Resource),
    /// Deleting failed
    DeleteFailed(Resource),
    /// The dashboard bulk load failed
    LoadFailed,
    SignupFailed,
    ResetDone,
    ResetFailed,
    ProfileSaved,
    ProfileSaveFailed,
    LoggedOut,
    ExportSaved,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::SaveFailed(_)
                | Self::DeleteFailed(_)
                | Self::LoadFailed
                | Self::SignupFailed
                | Self::ResetFailed
                | Self::ProfileSaveFailed
        )
    }

    /// The message text for a locale
    pub fn text(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.english(),
            Locale::Fr => self.french(),
        }
    }

    fn english(&self) -> &'static str {
        use Action::*;
        use Resource::*;
        match self {
            Self::Done(Transaction, Created) => "Transaction added",
            Self::Done(Transaction, Updated) => "Transaction updated",
            Self::Done(Transaction, Deleted) => "Transaction deleted",
            Self::Done(Category, Created) => "Category added",
            Self::Done(Category, Updated) => "Category updated",
            Self::Done(Category, Deleted) => "Category deleted",
            Self::Done(Wallet, Created) => "Wallet added",
            Self::Done(Wallet, Updated) => "Wallet updated",
            Self::Done(Wallet, Deleted) => "Wallet deleted",
            Self::Done(Budget, Created) => "Budget added",
            Self::Done(Budget, Updated) => "Budget updated",
            Self::Done(Budget, Deleted) => "Budget deleted",
            Self::SaveFailed(Transaction) => "Transaction error",
            Self::SaveFailed(Category) => "Category error",
            Self::SaveFailed(Wallet) => "Wallet error",
            Self::SaveFailed(Budget) => "Budget error",
            Self::DeleteFailed(Transaction) => "Could not delete transaction",
            Self::DeleteFailed(Category) => "Could not delete category",
            Self::DeleteFailed(Wallet) => "Could not delete wallet",
            Self::DeleteFailed(Budget) => "Could not delete budget",
            Self::LoadFailed => "Could not load data",
            Self::SignupFailed => "Could not create the account. Check the information entered.",
            Self::ResetDone => "All your data has been reset.",
            Self::ResetFailed => "Reset failed. Try again.",
            Self::ProfileSaved => "Profile updated",
            Self::ProfileSaveFailed => "Could not update profile",
            Self::LoggedOut => "Logged out",
            Self::ExportSaved => "Report saved",
        }
    }

    fn french(&self) -> &'static str {
        use Action::*;
        use Resource::*;
        match self {
            Self::Done(Transaction, Created) => "Transaction ajoutee",
            Self::Done(Transaction, Updated) => "Transaction modifiee",
            Self::Done(Transaction, Deleted) => "Transaction supprimee",
            Self::Done(Category, Created) => "Categorie ajoutee",
            Self::Done(Category, Updated) => "Categorie modifiee",
            Self::Done(Category, Deleted) => "Categorie supprimee",
            Self::Done(Wallet, Created) => "Portefeuille ajoute",
            Self::Done(Wallet, Updated) => "Portefeuille modifie",
            Self::Done(Wallet, Deleted) => "Portefeuille supprime",
            Self::Done(Budget, Created) => "Budget ajoute",
            Self::Done(Budget, Updated) => "Budget modifie",
            Self::Done(Budget, Deleted) => "Budget supprime",
            Self::SaveFailed(Transaction) => "Erreur sur la transaction",
            Self::SaveFailed(Category) => "Erreur categorie",
            Self::SaveFailed(Wallet) => "Erreur portefeuille",
            Self::SaveFailed(Budget) => "Erreur budget",
            Self::DeleteFailed(Transaction) => "Suppression impossible",
            Self::DeleteFailed(Category) => "Suppression categorie impossible",
            Self::DeleteFailed(Wallet) => "Suppression portefeuille impossible",
            Self::DeleteFailed(Budget) => "Suppression budget impossible",
            Self::LoadFailed => "Erreur de chargement des donnees",
            Self::SignupFailed => {
                "Impossible de creer le compte. Verifiez les informations saisies."
            }
            Self::ResetDone => "Toutes vos donnees ont ete remises a zero.",
            Self::ResetFailed => "Echec de la reinitialisation. Reessayez.",
            Self::ProfileSaved => "Profil mis a jour",
            Self::ProfileSaveFailed => "Mise a jour du profil impossible",
            Self::LoggedOut => "Deconnecte",
            Self::ExportSaved => "Rapport enregistre",
        }
    }
}

/// Failure notice for an action on a resource
pub fn failure(resource: Resource, action: Action) -> Notice {
    match action {
        Action::Deleted => Notice::DeleteFailed(resource),
        Action::Created | Action::Updated => Notice::SaveFailed(resource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue() {
        let notice = Notice::Done(Resource::Wallet, Action::Created);
        assert_eq!(notice.text(Locale::Fr), "Portefeuille ajoute");
        assert_eq!(notice.text(Locale::En), "Wallet added");
        assert!(!notice.is_error());

        assert_eq!(
            failure(Resource::Transaction, Action::Deleted).text(Locale::Fr),
            "Suppression impossible"
        );
        assert_eq!(
            failure(Resource::Budget, Action::Updated).text(Locale::Fr),
            "Erreur budget"
        );
        assert!(Notice::LoadFailed.is_error());
        assert_eq!(
            Notice::LoadFailed.text(Locale::Fr),
            "Erreur de chargement des donnees"
        );
    }
}
